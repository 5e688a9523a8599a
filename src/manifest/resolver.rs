//! Page lookup and prev/next navigation over a manifest

use super::{Manifest, ManifestError, PageDescriptor};

/// Pages adjacent to a resolved page, `None` at the sequence boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a PageDescriptor>,
    pub next: Option<&'a PageDescriptor>,
}

/// Resolves page ids against an immutable manifest
#[derive(Debug, Clone)]
pub struct Resolver {
    manifest: Manifest,
}

impl Resolver {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Every page id, in manifest order
    pub fn page_ids(&self) -> Vec<&str> {
        self.manifest.iter().map(|p| p.id.as_str()).collect()
    }

    /// Look up the descriptor for `id`
    pub fn resolve(&self, id: &str) -> Result<&PageDescriptor, ManifestError> {
        let pos = self.position(id)?;
        Ok(&self.manifest.pages()[pos])
    }

    /// Previous and next descriptors for `id`. No wraparound.
    pub fn neighbors(&self, id: &str) -> Result<Neighbors<'_>, ManifestError> {
        let pos = self.position(id)?;
        let pages = self.manifest.pages();

        let previous = if pos > 0 { pages.get(pos - 1) } else { None };
        let next = pages.get(pos + 1);

        Ok(Neighbors { previous, next })
    }

    fn position(&self, id: &str) -> Result<usize, ManifestError> {
        self.manifest
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ManifestError::NotFound(id.to_string()))
    }
}

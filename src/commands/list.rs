//! List site content

use anyhow::Result;

use crate::helpers::page_url;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "page" | "pages" => {
            let manifest = site.resolver.manifest();
            println!("Pages ({}):", manifest.len());
            for page in manifest {
                println!("  {} - {} [{}]", page.id, page.title, page.file);
            }
        }
        "route" | "routes" => {
            let routes = routes(site);
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: page, route",
                content_type
            );
        }
    }

    Ok(())
}

/// Every route the generator produces, in manifest order after the index
pub fn routes(site: &Site) -> Vec<String> {
    std::iter::once(page_url(&site.config, ""))
        .chain(
            site.resolver
                .page_ids()
                .into_iter()
                .map(|id| page_url(&site.config, id)),
        )
        .collect()
}

//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::{BuildReport, Generator};
use crate::{Site, CONFIG_FILE};

/// Quiet period after the last change before rebuilding
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();

    let generator = Generator::new(site)?;
    let report = generator.generate()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages and {} static files in {:.2}s",
        report.pages,
        report.assets,
        duration.as_secs_f64()
    );

    Ok(report)
}

/// Watch for file changes and regenerate.
///
/// The configuration is reloaded on every rebuild so manifest edits in
/// `_config.yml` take effect. Builds run on the blocking pool.
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&site.content_dir, notify::RecursiveMode::Recursive)?;

    if site.static_dir.exists() {
        watcher.watch(&site.static_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    while rx.recv().await.is_some() {
        // Debounce: wait until the burst of events from one save settles
        while let Ok(Some(_)) = tokio::time::timeout(DEBOUNCE, rx.recv()).await {}

        tracing::info!("File changed, regenerating...");
        let base_dir = site.base_dir.clone();
        let result =
            tokio::task::spawn_blocking(move || Site::new(&base_dir).and_then(|site| run(&site)))
                .await?;
        if let Err(e) = result {
            tracing::error!("Generation failed: {:#}", e);
        }
    }

    Ok(())
}

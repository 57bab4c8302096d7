use crate::error::IconError;
use crate::models::{IconIdentity, IconRef, ResolvedIcon};
use crate::rendering::write_png;
use crate::services::icon_engine::IconEngine;
use crate::services::resolver::{FileResolver, IconResolver};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};

/// Settings for a batch run over a [`FileResolver`] tree.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Silhouettes are written to `<output_dir>/<package>/<name>.png`
    pub output_dir: PathBuf,
    /// Maximum icons processed at once
    pub jobs: usize,
    /// Fit every silhouette to this size before writing
    pub target: Option<(i32, i32)>,
    /// Re-compress output with oxipng
    pub optimize: bool,
}

/// Counts of what happened to each discovered icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub monochrome: usize,
    pub passthrough: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Monochrome,
    Passthrough,
}

impl BatchReport {
    fn record(&mut self, result: Result<Result<Outcome, IconError>, JoinError>) {
        self.total += 1;
        match result {
            Ok(Ok(Outcome::Monochrome)) => self.monochrome += 1,
            Ok(Ok(Outcome::Passthrough)) => self.passthrough += 1,
            Ok(Err(e)) => {
                tracing::warn!(%e, "Icon failed");
                self.failed += 1;
            }
            Err(e) => {
                tracing::warn!(%e, "Icon task panicked");
                self.failed += 1;
            }
        }
    }
}

/// Resolve every icon under the resolver's root and write the silhouettes.
///
/// Icons run on the blocking pool, at most `jobs` at a time, all sharing
/// one engine and its caches.
pub async fn run_batch(
    engine: Arc<IconEngine>,
    resolver: Arc<FileResolver>,
    options: BatchOptions,
) -> Result<BatchReport, IconError> {
    let icons = resolver.discover()?;
    let jobs = options.jobs.max(1);
    let options = Arc::new(options);
    tracing::info!(icons = icons.len(), jobs, root = %resolver.root().display(), "Starting batch");

    let mut report = BatchReport::default();
    let mut tasks = JoinSet::new();

    for icon in icons {
        while tasks.len() >= jobs {
            if let Some(result) = tasks.join_next().await {
                report.record(result);
            }
        }
        let engine = engine.clone();
        let resolver = resolver.clone();
        let options = options.clone();
        tasks.spawn_blocking(move || process_icon(&engine, &resolver, &icon, &options));
    }
    while let Some(result) = tasks.join_next().await {
        report.record(result);
    }

    tracing::info!(
        total = report.total,
        monochrome = report.monochrome,
        passthrough = report.passthrough,
        failed = report.failed,
        "Batch finished"
    );
    Ok(report)
}

fn process_icon(
    engine: &IconEngine,
    resolver: &FileResolver,
    icon: &IconRef,
    options: &BatchOptions,
) -> Result<Outcome, IconError> {
    // Unreadable icons are failures here, not passthroughs
    resolver.load_themed(icon)?;
    let image = match engine.resolve_status_icon(icon, resolver) {
        ResolvedIcon::Passthrough => return Ok(Outcome::Passthrough),
        ResolvedIcon::Monochrome(image) => image,
    };
    let image = match options.target {
        Some((width, height)) => engine.fit(&image, width, height, Some(&icon.cache_key())),
        None => image,
    };

    let path = options
        .output_dir
        .join(icon.package())
        .join(format!("{}.png", output_stem(icon)));
    write_png(&path, &image, options.optimize)?;
    tracing::debug!(path = %path.display(), "Wrote silhouette");
    Ok(Outcome::Monochrome)
}

fn output_stem(icon: &IconRef) -> String {
    match icon.identity() {
        IconIdentity::ResourceRef { resource_id, .. } => resource_id.to_string(),
        IconIdentity::Opaque { .. } => "icon".to_string(),
    }
}

//! PNG round trips, config files and the batch pipeline on real files.

mod common;

use common::fixtures::{self, packages};
use mono_silhouette::{Argb, IconSource, RasterImage};
use pretty_assertions::assert_eq;
use statusmono::models::EngineConfig;
use statusmono::rendering::{decode_png, encode_png, read_png, write_png};
use statusmono::services::{run_batch, BatchOptions, BatchReport, FileResolver, IconEngine};
use std::sync::Arc;
use tempfile::TempDir;

fn flat(source: IconSource) -> RasterImage {
    source.to_raster()
}

#[test]
fn test_optimized_png_decodes_to_same_pixels() {
    let image = RasterImage::from_fn(20, 12, |x, y| Argb::white(((x * 12 + y) % 256) as u8));

    let plain = encode_png(&image, false).unwrap();
    let optimized = encode_png(&image, true).unwrap();

    assert_eq!(decode_png(&plain).unwrap(), image);
    assert_eq!(decode_png(&optimized).unwrap(), image);
}

#[test]
fn test_write_creates_parent_directories() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a/b/icon.png");
    let image = flat(fixtures::white_glyph());

    write_png(&path, &image, false).unwrap();
    assert_eq!(read_png(&path).unwrap(), image);
}

#[test]
fn test_config_file_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("statusmono.yaml");
    std::fs::write(
        &path,
        "caches:\n  fitted: 12\nalways_refresh_packages:\n  - com.example.launcher\n",
    )
    .unwrap();

    let config = EngineConfig::load(Some(path.as_path()));
    assert_eq!(config.caches.fitted, 12);
    assert_eq!(config.caches.monochrome, 100);
    assert_eq!(config.always_refresh_packages, vec!["com.example.launcher"]);

    let engine = IconEngine::new(&config);
    let fitted = engine
        .cache_snapshot()
        .into_iter()
        .find(|s| s.kind.as_str() == "fitted")
        .unwrap();
    assert_eq!(fitted.capacity, 12);
}

#[test]
fn test_invalid_config_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.yaml");
    std::fs::write(&path, "caches: [unterminated").unwrap();

    assert_eq!(EngineConfig::load(Some(path.as_path())), EngineConfig::default());
}

#[tokio::test]
async fn test_batch_writes_silhouettes() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    // Colored resource icon, monochrome resource icon, colored bitmap icon
    write_png(
        &input.path().join(packages::MAIL).join("17.png"),
        &flat(fixtures::colored_icon()),
        false,
    )
    .unwrap();
    write_png(
        &input.path().join(packages::MAIL).join("18.png"),
        &flat(fixtures::white_glyph()),
        false,
    )
    .unwrap();
    write_png(
        &input.path().join(packages::CHAT).join("icon.png"),
        &flat(fixtures::colored_icon()),
        false,
    )
    .unwrap();

    let engine = Arc::new(IconEngine::default());
    let resolver = Arc::new(FileResolver::new(input.path()));
    let options = BatchOptions {
        output_dir: output.path().to_path_buf(),
        jobs: 2,
        target: Some((24, 24)),
        optimize: false,
    };

    let report = run_batch(engine.clone(), resolver, options).await.unwrap();

    assert_eq!(
        report,
        BatchReport {
            total: 3,
            monochrome: 2,
            passthrough: 1,
            failed: 0,
        }
    );

    let mail = read_png(&output.path().join(packages::MAIL).join("17.png")).unwrap();
    assert_eq!((mail.width(), mail.height()), (24, 24));
    let chat = read_png(&output.path().join(packages::CHAT).join("icon.png")).unwrap();
    assert_eq!((chat.width(), chat.height()), (24, 24));
    assert!(!output.path().join(packages::MAIL).join("18.png").exists());
    assert_eq!(engine.rescale_count(), 2);
}

#[tokio::test]
async fn test_batch_on_empty_tree() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let report = run_batch(
        Arc::new(IconEngine::default()),
        Arc::new(FileResolver::new(input.path())),
        BatchOptions {
            output_dir: output.path().to_path_buf(),
            jobs: 4,
            target: None,
            optimize: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(report, BatchReport::default());
}

#[tokio::test]
async fn test_batch_counts_unreadable_icon_as_failed() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_png(
        &input.path().join(packages::MAIL).join("17.png"),
        &flat(fixtures::colored_icon()),
        false,
    )
    .unwrap();
    std::fs::write(
        input.path().join(packages::MAIL).join("19.png"),
        b"definitely not a png",
    )
    .unwrap();

    let report = run_batch(
        Arc::new(IconEngine::default()),
        Arc::new(FileResolver::new(input.path())),
        BatchOptions {
            output_dir: output.path().to_path_buf(),
            jobs: 2,
            target: None,
            optimize: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(
        report,
        BatchReport {
            total: 2,
            monochrome: 1,
            passthrough: 0,
            failed: 1,
        }
    );
    assert!(!output.path().join(packages::MAIL).join("19.png").exists());
}

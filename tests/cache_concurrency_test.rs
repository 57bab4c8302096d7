//! Cache bounds and consistency under concurrent use.

mod common;

use common::fixtures;
use mono_silhouette::{Argb, IconSource, RasterImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statusmono::models::{CacheCapacities, EngineConfig, IconRef};
use statusmono::services::{BoundedCache, CacheKind, IconEngine};
use std::sync::Arc;

fn small_engine() -> IconEngine {
    IconEngine::new(&EngineConfig {
        caches: CacheCapacities {
            raw_resource: 4,
            monochrome: 8,
            fitted: 6,
            descriptor: 5,
            source_icon: 3,
        },
        ..EngineConfig::default()
    })
}

fn tiny_icon(seed: u8) -> IconSource {
    IconSource::Flat(RasterImage::from_fn(16, 16, |x, y| {
        if (4..12).contains(&x) && (4..12).contains(&y) {
            Argb::new(255, 255, 255, 255)
        } else {
            Argb::new(255, seed, 0, 255 - seed)
        }
    }))
}

#[test]
fn test_bound_holds_for_random_insert_sequences() {
    let mut rng = StdRng::seed_from_u64(7);
    for capacity in [1usize, 2, 3, 4, 7, 8, 100] {
        let cache = BoundedCache::new(CacheKind::Monochrome, capacity);
        for _ in 0..500 {
            let key = format!("r_pkg_{}", rng.gen_range(0..300));
            cache.insert(&key, rng.gen::<u32>());
            assert!(
                cache.len() <= capacity,
                "cache grew to {} with capacity {}",
                cache.len(),
                capacity
            );
        }
    }
}

#[test]
fn test_bound_holds_under_concurrent_inserts() {
    let cache = Arc::new(BoundedCache::new(CacheKind::Fitted, 16));

    std::thread::scope(|scope| {
        for t in 0..8 {
            let cache = cache.clone();
            scope.spawn(move || {
                for i in 0..1000 {
                    cache.insert(&format!("fit_{t}_{i}_24_24"), i);
                }
            });
        }
    });

    assert!(cache.len() <= 16, "cache grew to {}", cache.len());
    assert!(cache.stats().evictions > 0);
}

#[test]
fn test_engine_caches_stay_bounded_across_threads() {
    let engine = Arc::new(small_engine());

    std::thread::scope(|scope| {
        for t in 0..6u8 {
            let engine = engine.clone();
            scope.spawn(move || {
                for i in 0..40u8 {
                    let package = format!("pkg.{t}.{i}");
                    let icon = IconRef::resource(package.as_str(), "", i32::from(i) + 1);
                    let mono = engine.synthesize_monochrome(&icon, &tiny_icon(i * 6), None);
                    engine.fit(&mono, 8, 8, Some(&icon.cache_key()));
                    engine.remember_source_icon(&package, icon);
                }
            });
        }
    });

    for stats in engine.cache_snapshot() {
        assert!(
            stats.len <= stats.capacity,
            "{} holds {} entries with capacity {}",
            stats.kind,
            stats.len,
            stats.capacity
        );
    }
}

#[test]
fn test_concurrent_misses_agree_on_result() {
    let engine = Arc::new(IconEngine::default());
    let icon = fixtures::mail_icon();
    let source = fixtures::colored_icon();

    let results: Vec<RasterImage> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                let icon = icon.clone();
                let source = source.clone();
                scope.spawn(move || engine.synthesize_monochrome(&icon, &source, None))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Duplicate computation is allowed, divergent results are not
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert!(engine.synthesis_count() >= 1);
    assert!(engine.caches().monochrome().contains(icon.cache_key().as_str()));
}

#[test]
fn test_clear_all_empties_every_table() {
    let engine = small_engine();
    let icon = fixtures::mail_icon();
    let mono = engine.synthesize_monochrome(&icon, &fixtures::colored_icon(), None);
    engine.fit(&mono, 24, 24, Some(&icon.cache_key()));
    engine.remember_source_icon("com.example.mail", icon);

    engine.clear_all();

    assert!(engine.cache_snapshot().iter().all(|s| s.len == 0));
}

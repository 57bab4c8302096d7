use crate::error::IconError;
use crate::models::{CacheKey, Classification, EngineConfig, IconRef, ResolvedIcon};
use crate::services::fit::FitEngine;
use crate::services::resolver::IconResolver;
use crate::services::tiered_cache::{CacheStats, TieredCache};
use mono_silhouette::{
    detect_color_saturation, is_bad_silhouette, DecisionEngine, IconSource, RasterImage,
    Thresholds,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Classification, synthesis and caching for status icons.
///
/// One engine is constructed at startup and shared (it is `Send + Sync`)
/// by every call site. All state lives in its [`TieredCache`].
pub struct IconEngine {
    decision: DecisionEngine,
    caches: TieredCache,
    fitter: FitEngine,
    always_refresh: HashSet<String>,
    syntheses: AtomicU64,
}

impl IconEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            decision: DecisionEngine::new(config.thresholds.clone()),
            caches: TieredCache::new(&config.caches),
            fitter: FitEngine::new(),
            always_refresh: config.always_refresh_packages.iter().cloned().collect(),
            syntheses: AtomicU64::new(0),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        self.decision.thresholds()
    }

    pub fn caches(&self) -> &TieredCache {
        &self.caches
    }

    /// Whether `image` is a full-color icon rather than a tinted silhouette.
    pub fn classify(&self, icon: &IconRef, image: &RasterImage) -> Classification {
        let is_colored = detect_color_saturation(image, self.thresholds());
        tracing::debug!(key = %icon.cache_key(), is_colored, "Classified icon");
        Classification { is_colored }
    }

    /// Monochrome silhouette for `icon`, memoized per identity.
    ///
    /// When the unthemed source is given, its silhouette (cached under the
    /// `_raw` key) is preferred if it passes the quality gate. A rejected raw
    /// silhouette is evicted and the themed one is used instead.
    pub fn synthesize_monochrome(
        &self,
        icon: &IconRef,
        themed: &IconSource,
        raw_unthemed: Option<&IconSource>,
    ) -> RasterImage {
        let key = icon.cache_key();

        if let Some(raw) = raw_unthemed {
            let raw_key = key.raw_path();
            let mono = self.cached_monochrome(&raw_key, raw);
            if !is_bad_silhouette(&mono, self.thresholds()) {
                return mono;
            }
            tracing::warn!(key = %raw_key, "Unthemed silhouette rejected, using themed icon");
            self.caches.monochrome().remove(raw_key.as_str());
        }

        self.cached_monochrome(&key, themed)
    }

    /// Fit a silhouette to the target size. See [`FitEngine::fit`].
    pub fn fit(
        &self,
        image: &RasterImage,
        target_width: i32,
        target_height: i32,
        cache_key: Option<&CacheKey>,
    ) -> RasterImage {
        self.fitter.fit(
            self.caches.fitted(),
            image,
            target_width,
            target_height,
            cache_key,
        )
    }

    /// Unthemed source for a resource identity, cached under `raw_<ns>_<id>`.
    pub fn load_unthemed(
        &self,
        icon: &IconRef,
        resolver: &dyn IconResolver,
    ) -> Result<IconSource, IconError> {
        let Some(raw_key) = icon.raw_resource_key() else {
            return Err(IconError::UnresolvedIdentity(icon.package().to_string()));
        };
        if let Some(cached) = self.caches.raw_resource().get(raw_key.as_str()) {
            return Ok(cached);
        }

        let source = resolver.load_unthemed(icon)?;
        self.caches
            .raw_resource()
            .insert(raw_key.as_str(), source.clone());
        Ok(source)
    }

    /// Decide what a status surface should show for `icon`.
    ///
    /// Colored resource icons are replaced by a silhouette, preferring the
    /// unthemed source unless that source is already monochrome. Monochrome
    /// icons pass through. Icons without a resource are always replaced.
    /// Decisions are cached under `sb_<key>`; a failed themed load is not.
    pub fn resolve_status_icon(
        &self,
        icon: &IconRef,
        resolver: &dyn IconResolver,
    ) -> ResolvedIcon {
        let descriptor_key = icon.cache_key().descriptor();
        if let Some(cached) = self.caches.descriptor().get(descriptor_key.as_str()) {
            return cached;
        }

        let themed = match resolver.load_themed(icon) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(%e, key = %descriptor_key, "Themed icon unavailable, passing through");
                return ResolvedIcon::Passthrough;
            }
        };

        let resolved = if icon.is_resource() {
            self.resolve_resource_icon(icon, &themed, resolver)
        } else {
            ResolvedIcon::Monochrome(self.synthesize_monochrome(icon, &themed, None))
        };

        self.caches
            .descriptor()
            .insert(descriptor_key.as_str(), resolved.clone());
        resolved
    }

    fn resolve_resource_icon(
        &self,
        icon: &IconRef,
        themed: &IconSource,
        resolver: &dyn IconResolver,
    ) -> ResolvedIcon {
        if !self.is_colored(themed) {
            return ResolvedIcon::Passthrough;
        }

        match self.load_unthemed(icon, resolver) {
            Ok(raw) if !self.is_colored(&raw) => {
                tracing::debug!(key = %icon.cache_key(), "Unthemed icon is monochrome, passing through");
                ResolvedIcon::Passthrough
            }
            Ok(raw) => ResolvedIcon::Monochrome(self.synthesize_monochrome(icon, themed, Some(&raw))),
            Err(e) => {
                tracing::debug!(%e, key = %icon.cache_key(), "No unthemed icon, using themed");
                ResolvedIcon::Monochrome(self.synthesize_monochrome(icon, themed, None))
            }
        }
    }

    /// Record the small icon last seen for `package`.
    ///
    /// The first icon recorded for a package is kept, except for packages in
    /// `always_refresh_packages`, which are overwritten on every call.
    pub fn remember_source_icon(&self, package: &str, icon: IconRef) {
        let table = self.caches.source_icon();
        if self.always_refresh.contains(package) || !table.contains(package) {
            table.insert(package, icon);
        }
    }

    pub fn source_icon(&self, package: &str) -> Option<IconRef> {
        self.caches.source_icon().get(package)
    }

    /// Silhouette for an expanded panel entry of `package`, fitted to the target.
    ///
    /// Uses the remembered source icon: the unthemed silhouette first, then
    /// the themed one. Without a usable source icon, the caller's `original`
    /// is synthesized under the package's weak key and returned unfitted.
    pub fn resolve_panel_icon(
        &self,
        package: &str,
        original: &IconSource,
        target_width: i32,
        target_height: i32,
        resolver: &dyn IconResolver,
    ) -> RasterImage {
        if let Some(icon) = self.source_icon(package) {
            let base = icon.cache_key();

            if let Ok(raw) = self.load_unthemed(&icon, resolver) {
                let raw_key = base.raw_path();
                let mono = self.cached_monochrome(&raw_key, &raw);
                if !is_bad_silhouette(&mono, self.thresholds()) {
                    return self.fit(&mono, target_width, target_height, Some(&raw_key));
                }
                tracing::warn!(key = %raw_key, "Unthemed panel silhouette rejected");
                self.caches.monochrome().remove(raw_key.as_str());
            }

            match resolver.load_themed(&icon) {
                Ok(themed) => {
                    let mono = self.cached_monochrome(&base, &themed);
                    return self.fit(&mono, target_width, target_height, Some(&base));
                }
                Err(e) => {
                    tracing::warn!(%e, package, "Source icon unavailable, using original");
                }
            }
        }

        self.cached_monochrome(&CacheKey::weak(package), original)
    }

    /// Per-table size, capacity and counters.
    pub fn cache_snapshot(&self) -> Vec<CacheStats> {
        self.caches.snapshot()
    }

    pub fn clear_all(&self) {
        self.caches.clear_all();
    }

    /// Number of decision-tree runs (cache misses that synthesized).
    pub fn synthesis_count(&self) -> u64 {
        self.syntheses.load(Ordering::Relaxed)
    }

    /// Number of fit resamples actually computed.
    pub fn rescale_count(&self) -> u64 {
        self.fitter.rescale_count()
    }

    fn is_colored(&self, source: &IconSource) -> bool {
        detect_color_saturation(&source.to_raster(), self.thresholds())
    }

    fn cached_monochrome(&self, key: &CacheKey, source: &IconSource) -> RasterImage {
        if let Some(cached) = self.caches.monochrome().get(key.as_str()) {
            return cached;
        }

        let synthesis = self.decision.synthesize(source);
        self.syntheses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key = %key, path = %synthesis.path, "Synthesized monochrome icon");

        self.caches
            .monochrome()
            .insert(key.as_str(), synthesis.image.clone());
        synthesis.image
    }
}

impl Default for IconEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

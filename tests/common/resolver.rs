//! In-memory resolver that counts every load.

use mono_silhouette::IconSource;
use statusmono::error::IconError;
use statusmono::models::IconRef;
use statusmono::services::IconResolver;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct CountingResolver {
    themed: HashMap<IconRef, IconSource>,
    unthemed: HashMap<IconRef, IconSource>,
    themed_loads: AtomicUsize,
    unthemed_loads: AtomicUsize,
}

impl CountingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_themed(mut self, icon: IconRef, source: IconSource) -> Self {
        self.themed.insert(icon, source);
        self
    }

    pub fn with_unthemed(mut self, icon: IconRef, source: IconSource) -> Self {
        self.unthemed.insert(icon, source);
        self
    }

    pub fn themed_loads(&self) -> usize {
        self.themed_loads.load(Ordering::SeqCst)
    }

    pub fn unthemed_loads(&self) -> usize {
        self.unthemed_loads.load(Ordering::SeqCst)
    }
}

impl IconResolver for CountingResolver {
    fn load_themed(&self, icon: &IconRef) -> Result<IconSource, IconError> {
        self.themed_loads.fetch_add(1, Ordering::SeqCst);
        self.themed
            .get(icon)
            .cloned()
            .ok_or_else(|| IconError::ResourceUnavailable(icon.cache_key().to_string()))
    }

    fn load_unthemed(&self, icon: &IconRef) -> Result<IconSource, IconError> {
        self.unthemed_loads.fetch_add(1, Ordering::SeqCst);
        self.unthemed
            .get(icon)
            .cloned()
            .ok_or_else(|| IconError::ResourceUnavailable(icon.cache_key().to_string()))
    }
}

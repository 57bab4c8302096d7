pub mod batch;
pub mod fit;
pub mod icon_engine;
pub mod resolver;
pub mod tiered_cache;

pub use batch::{run_batch, BatchOptions, BatchReport};
pub use fit::FitEngine;
pub use icon_engine::IconEngine;
pub use resolver::{FileResolver, IconResolver};
pub use tiered_cache::{BoundedCache, CacheKind, CacheStats, TieredCache};

pub mod config;
pub mod identity;
pub mod resolved;

pub use config::{CacheCapacities, EngineConfig};
pub use identity::{CacheKey, IconIdentity, IconRef};
pub use resolved::{Classification, ResolvedIcon};

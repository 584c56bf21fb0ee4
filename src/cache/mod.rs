// Cache module for repository metadata.
// Key construction plus the durable store seam with file and in-memory backends.

pub mod keys;
pub mod memory;
pub mod store;

pub use keys::{CacheKey, cache_dir};
pub use memory::MemoryStore;
pub use store::{CacheStore, CachedData, DEFAULT_TTL, FileStore};

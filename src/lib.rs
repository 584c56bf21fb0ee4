// govanity: Go vanity import paths backed by cached GitHub metadata.
// Maps request paths to repository names and serves repository metadata through a TTL cache.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod import;
pub mod mapping;
pub mod telemetry;

pub use engine::{PackageListing, PackagePage, VanityEngine};
pub use error::{Result, VanityError};
pub use fetcher::{Fetcher, Lookup};
pub use mapping::{MappingRules, RewriteRule};

// Vanity path mapping module.
// Parses rewrite rules and resolves inbound paths to repository names.

pub mod resolve;
pub mod rules;

pub use resolve::{normalize, resolve, strip_version_suffix, vanity_path};
pub use rules::{MappingRules, RewriteRule};

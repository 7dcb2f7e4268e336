//! Settings structure for the filter engine

use serde::Deserialize;

use crate::filter::ParseOptions;

/// Default number of parsed filters kept in the cache
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Runtime configuration for parsing and caching filters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Accept a `(` that is never closed
    pub allow_unclosed_paren: bool,
    /// Maximum number of cached parse results; 0 disables the cache
    pub cache_capacity: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allow_unclosed_paren: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl FilterConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            allow_unclosed_paren: self.allow_unclosed_paren,
        }
    }
}

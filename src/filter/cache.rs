//! Parsed filter cache
//!
//! Group filters are stored as strings and checked against many records, so
//! parse results are kept keyed by the raw filter string. Every entry of a
//! cache was parsed with that cache's options.

use std::sync::Arc;

use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::config;
use crate::error::Result;
use crate::filter::ast::Expression;
use crate::filter::evaluator::Record;
use crate::filter::parser::{self, ParseOptions};

#[derive(Debug)]
struct Entries {
    map: AHashMap<String, Arc<Expression>>,
    capacity: usize,
    options: ParseOptions,
}

/// Bounded map from filter string to parsed expression
///
/// Inserting into a full cache clears it first.
#[derive(Debug)]
pub struct ParseCache {
    entries: RwLock<Entries>,
}

impl ParseCache {
    /// Create a cache holding at most `capacity` entries; 0 disables caching
    pub fn new(capacity: usize, options: ParseOptions) -> Self {
        Self {
            entries: RwLock::new(Entries {
                map: AHashMap::with_capacity(capacity.min(2048)),
                capacity,
                options,
            }),
        }
    }

    /// Get or parse a filter string, using the cache for repeated filters
    pub fn get_or_parse(&self, filter: &str) -> Result<Arc<Expression>> {
        // Fast path: check read lock first
        let options = {
            let entries = self.entries.read();
            if let Some(expr) = entries.map.get(filter) {
                return Ok(Arc::clone(expr));
            }
            entries.options
        };

        // Slow path: parse and cache
        let expr = Arc::new(parser::parse_with(filter, &options)?);

        {
            let mut entries = self.entries.write();
            // A reset with other options raced the parse; don't cache it.
            if entries.capacity > 0 && entries.options == options {
                if entries.map.len() >= entries.capacity {
                    debug!(size = entries.map.len(), "filter cache full, clearing");
                    entries.map.clear();
                }
                entries.map.insert(filter.to_string(), Arc::clone(&expr));
            }
        }

        Ok(expr)
    }

    /// Drop every entry, then change the capacity and parse options
    pub fn reset(&self, capacity: usize, options: ParseOptions) {
        let mut entries = self.entries.write();
        entries.map.clear();
        entries.capacity = capacity;
        entries.options = options;
    }

    pub fn clear(&self) {
        self.entries.write().map.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.read().capacity
    }

    pub fn options(&self) -> ParseOptions {
        self.entries.read().options
    }
}

/// Global filter cache, sized from the active configuration
static FILTER_CACHE: Lazy<ParseCache> = Lazy::new(|| {
    let config = config::active();
    ParseCache::new(config.cache_capacity, config.parse_options())
});

/// Get or parse a filter string through the global cache
#[inline]
pub fn get_or_parse(filter: &str) -> Result<Arc<Expression>> {
    FILTER_CACHE.get_or_parse(filter)
}

/// Check a filter against a record, using the cached expression
///
/// An empty filter matches everything and is never cached.
#[inline]
pub fn check_filter<R: Record + ?Sized>(filter: &str, record: &R) -> Result<bool> {
    if filter.is_empty() {
        return Ok(true);
    }

    let expr = get_or_parse(filter)?;
    Ok(expr.evaluate(record))
}

/// Indices of the records a filter matches, in input order
pub fn filter_records<R: Record>(filter: &str, records: &[R]) -> Result<Vec<usize>> {
    if filter.is_empty() {
        return Ok((0..records.len()).collect());
    }

    let expr = get_or_parse(filter)?;
    let matched: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| expr.evaluate(*record))
        .map(|(i, _)| i)
        .collect();

    debug!(
        filter,
        total = records.len(),
        matched = matched.len(),
        "filtered records"
    );
    Ok(matched)
}

/// Rebuild the global cache for a new configuration, dropping every entry
pub(crate) fn reset_cache(capacity: usize, options: ParseOptions) {
    FILTER_CACHE.reset(capacity, options);
}

/// Clear the global cache (useful for testing)
pub fn clear_cache() {
    FILTER_CACHE.clear();
}

/// Get global cache size
pub fn cache_size() -> usize {
    FILTER_CACHE.len()
}

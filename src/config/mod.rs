//! Configuration module for the filter engine
//!
//! The active configuration is process-wide. It can be installed from JSON or,
//! with the `python` feature, from a Python dict or attribute object.

mod settings;

pub use settings::*;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use tracing::info;

use crate::error::{FilterError, Result};
use crate::filter::cache;

/// Installed configuration; unset until `install` is first called
static ACTIVE_CONFIG: OnceCell<RwLock<FilterConfig>> = OnceCell::new();

/// Snapshot of the active configuration, or the default if none is installed
pub fn active() -> FilterConfig {
    ACTIVE_CONFIG
        .get()
        .map(|lock| lock.read().clone())
        .unwrap_or_default()
}

/// Check if a configuration has been installed
pub fn is_initialized() -> bool {
    ACTIVE_CONFIG.get().is_some()
}

/// Install a configuration and drop every cached parse result
pub fn install(config: FilterConfig) {
    let (capacity, options) = (config.cache_capacity, config.parse_options());
    info!(
        allow_unclosed_paren = config.allow_unclosed_paren,
        cache_capacity = config.cache_capacity,
        "installing filter config"
    );

    // If already initialized, update the config
    if let Some(existing) = ACTIVE_CONFIG.get() {
        *existing.write() = config;
    } else if let Err(lock) = ACTIVE_CONFIG.set(RwLock::new(config)) {
        // Lost an initialization race; overwrite the winner.
        if let Some(existing) = ACTIVE_CONFIG.get() {
            *existing.write() = lock.into_inner();
        }
    }

    cache::reset_cache(capacity, options);
}

/// Deserialize a configuration from a JSON document
///
/// Missing keys take their defaults; unknown keys are rejected.
pub fn from_json(json: &str) -> Result<FilterConfig> {
    serde_json::from_str(json).map_err(|e| FilterError::InvalidConfig(e.to_string()))
}

#[cfg(feature = "python")]
mod python {
    use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
    use pyo3::{Bound, PyAny};

    use super::FilterConfig;
    use crate::error::FilterError;

    /// Keys accepted in a Python configuration
    const KNOWN_KEYS: [&str; 2] = ["allow_unclosed_paren", "cache_capacity"];

    /// Helper to get optional attribute from either dict or object
    fn get_attr_opt<'py>(obj: &Bound<'py, PyAny>, name: &str) -> Option<Bound<'py, PyAny>> {
        if let Ok(dict) = obj.downcast::<PyDict>() {
            dict.get_item(name).ok().flatten()
        } else {
            obj.getattr(name).ok()
        }
    }

    fn invalid(name: &str, err: pyo3::PyErr) -> pyo3::PyErr {
        FilterError::InvalidConfig(format!("{}: {}", name, err)).into()
    }

    /// Deserialize a filter config from a Python dict or attribute object
    pub fn deserialize_filter_config(obj: &Bound<'_, PyAny>) -> pyo3::PyResult<FilterConfig> {
        if let Ok(dict) = obj.downcast::<PyDict>() {
            for key in dict.keys() {
                let key: String = key.extract()?;
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    return Err(
                        FilterError::InvalidConfig(format!("unknown key: {}", key)).into(),
                    );
                }
            }
        }

        let defaults = FilterConfig::default();

        let allow_unclosed_paren = match get_attr_opt(obj, "allow_unclosed_paren") {
            Some(v) if !v.is_none() => v
                .extract::<bool>()
                .map_err(|e| invalid("allow_unclosed_paren", e))?,
            _ => defaults.allow_unclosed_paren,
        };
        let cache_capacity = match get_attr_opt(obj, "cache_capacity") {
            Some(v) if !v.is_none() => v
                .extract::<usize>()
                .map_err(|e| invalid("cache_capacity", e))?,
            _ => defaults.cache_capacity,
        };

        Ok(FilterConfig {
            allow_unclosed_paren,
            cache_capacity,
        })
    }
}

#[cfg(feature = "python")]
pub use python::deserialize_filter_config;

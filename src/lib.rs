//! Group Filter Core - filter-expression engine for group membership
//!
//! Parses human-typed boolean queries such as
//! `county = travis and ( party ~ green or 'first name' = ada )`,
//! evaluates them against records of string fields and renders them back in a
//! canonical form. With the `python` feature the engine is exposed as a
//! Python extension module.

pub mod config;
pub mod error;
pub mod filter;

pub use crate::error::{FilterError, LexError, ParseError, Result};
pub use crate::filter::{
    check_filter, filter_records, parse, parse_tokens, parse_with, tokenize, Condition,
    Expression, Operator, ParseOptions, Record, Token,
};

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;
    use std::collections::HashMap;

    use crate::config::{self, FilterConfig};
    use crate::filter::{cache, FilterHandle};

    // ============================================================================
    // Python Functions
    // ============================================================================

    /// Install the filter configuration
    ///
    /// Accepts a dict or any object with `allow_unclosed_paren` and
    /// `cache_capacity` attributes; missing settings take their defaults.
    /// Installing a configuration clears the parse cache.
    #[pyfunction]
    #[pyo3(signature = (config=None))]
    fn init_config(config: Option<&Bound<'_, PyAny>>) -> PyResult<()> {
        let settings = match config {
            Some(obj) if !obj.is_none() => config::deserialize_filter_config(obj)?,
            _ => FilterConfig::default(),
        };
        config::install(settings);
        Ok(())
    }

    /// Check if config is initialized
    #[pyfunction]
    fn is_config_initialized() -> bool {
        config::is_initialized()
    }

    /// Parse a filter string
    ///
    /// # Raises
    /// ValueError if the filter is malformed
    #[pyfunction]
    fn parse_filter(query: &str) -> PyResult<FilterHandle> {
        let expr = cache::get_or_parse(query)?;
        Ok(FilterHandle::new(expr))
    }

    /// Canonical form of a filter string
    #[pyfunction]
    fn canonicalize(query: &str) -> PyResult<String> {
        Ok(cache::get_or_parse(query)?.render())
    }

    /// Check a filter against one record
    #[pyfunction]
    fn check_filter(query: &str, record: HashMap<String, String>) -> PyResult<bool> {
        Ok(cache::check_filter(query, &record)?)
    }

    /// Indices of the records a filter matches
    #[pyfunction]
    fn filter_records(query: &str, records: Vec<HashMap<String, String>>) -> PyResult<Vec<usize>> {
        Ok(cache::filter_records(query, &records)?)
    }

    /// Filter records asynchronously
    ///
    /// Runs the batch in a background thread using Tokio's spawn_blocking, so
    /// Python's asyncio event loop stays responsive on large record sets.
    ///
    /// # Example (Python)
    /// ```python
    /// matched = await filter_records_async("city = austin", people)
    /// ```
    #[pyfunction]
    fn filter_records_async<'py>(
        py: Python<'py>,
        query: String,
        records: Vec<HashMap<String, String>>,
    ) -> PyResult<Bound<'py, PyAny>> {
        pyo3_async_runtimes::tokio::future_into_py(py, async move {
            let matched = tokio::task::spawn_blocking(move || {
                cache::filter_records(&query, &records).map_err(PyErr::from)
            })
            .await
            .map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                    "Filter task panicked: {}",
                    e
                ))
            })??;

            Ok(matched)
        })
    }

    // ============================================================================
    // Python Module Definition
    // ============================================================================

    /// Python module definition
    #[pymodule]
    fn group_filter_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(init_config, m)?)?;
        m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
        m.add_function(wrap_pyfunction!(parse_filter, m)?)?;
        m.add_function(wrap_pyfunction!(canonicalize, m)?)?;
        m.add_function(wrap_pyfunction!(check_filter, m)?)?;
        m.add_function(wrap_pyfunction!(filter_records, m)?)?;
        m.add_function(wrap_pyfunction!(filter_records_async, m)?)?;
        m.add_class::<FilterHandle>()?;
        Ok(())
    }
}

//! Filter - parsed expression handle for the Python boundary
//!
//! Holds the expression tree in Rust heap memory so Python can evaluate it
//! against many records without re-parsing or serializing the tree.

use pyo3::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FilterError;
use crate::filter::ast::Expression;

/// Parsed filter exposed to Python as `Filter`
#[pyclass(name = "Filter", module = "group_filter_core", frozen)]
#[derive(Debug, Clone)]
pub struct FilterHandle {
    expr: Arc<Expression>,
}

impl FilterHandle {
    pub fn new(expr: Arc<Expression>) -> Self {
        Self { expr }
    }

    pub fn expression(&self) -> &Expression {
        &self.expr
    }
}

#[pymethods]
impl FilterHandle {
    /// Evaluate against a record of field name to string value
    fn evaluate(&self, record: HashMap<String, String>) -> bool {
        self.expr.evaluate(&record)
    }

    /// Canonical string form
    fn render(&self) -> String {
        self.expr.render()
    }

    /// Expression tree as JSON, for audit logs
    fn to_json(&self) -> PyResult<String> {
        Ok(serde_json::to_string(self.expr.as_ref()).map_err(FilterError::from)?)
    }

    /// True when the filter matches every record
    #[getter]
    fn is_vacuous(&self) -> bool {
        self.expr.is_vacuous()
    }

    #[getter]
    fn condition_count(&self) -> usize {
        self.expr.condition_count()
    }

    fn __str__(&self) -> String {
        self.expr.render()
    }

    fn __repr__(&self) -> String {
        format!("Filter({:?})", self.expr.render())
    }
}

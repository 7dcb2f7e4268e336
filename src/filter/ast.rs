//! Expression tree for filter queries

use serde::{Deserialize, Serialize};

/// Filter expression node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    /// Leaf comparison like `name ~ smith`
    Condition(Condition),
    /// Every child must hold
    And { children: Vec<Expression> },
    /// Any child holding suffices
    Or { children: Vec<Expression> },
}

/// Single field comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Case-insensitive equality (=)
    #[serde(rename = "=")]
    Equals,
    /// Case-insensitive substring (~)
    #[serde(rename = "~")]
    Contains,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::Contains => "~",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Operator::Equals),
            "~" => Some(Operator::Contains),
            _ => None,
        }
    }
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

impl Expression {
    /// The expression matching every record
    pub fn vacuous() -> Self {
        Expression::Or {
            children: Vec::new(),
        }
    }

    pub fn condition(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Expression::Condition(Condition::new(field, operator, value))
    }

    pub fn and(children: Vec<Expression>) -> Self {
        Expression::And { children }
    }

    pub fn or(children: Vec<Expression>) -> Self {
        Expression::Or { children }
    }

    /// True for a group with no children
    pub fn is_vacuous(&self) -> bool {
        match self {
            Expression::Condition(_) => false,
            Expression::And { children } | Expression::Or { children } => children.is_empty(),
        }
    }

    /// Number of conditions in the tree
    pub fn condition_count(&self) -> usize {
        match self {
            Expression::Condition(_) => 1,
            Expression::And { children } | Expression::Or { children } => {
                children.iter().map(Expression::condition_count).sum()
            }
        }
    }
}

impl From<Condition> for Expression {
    fn from(condition: Condition) -> Self {
        Expression::Condition(condition)
    }
}

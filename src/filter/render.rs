//! Canonical rendering of expression trees
//!
//! The canonical form depends only on the tree: conditions are written as
//! `field op value` with single quotes where needed, groups of two or more
//! children are parenthesized and joined with upper-case `AND` / `OR`.

use std::fmt::{self, Write};

use crate::filter::ast::{Condition, Expression};

/// Quote `input` with single quotes if it contains quotes, whitespace or
/// parens, is empty, or is a conjunction keyword.
///
/// Embedded apostrophes are written as `\'`; double quotes are left as-is.
pub fn quote_if_needed(input: &str) -> String {
    if !needs_quotes(input) {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len() + 2);
    output.push('\'');
    for c in input.chars() {
        if c == '\'' {
            output.push_str("\\'");
        } else {
            output.push(c);
        }
    }
    output.push('\'');
    output
}

fn needs_quotes(input: &str) -> bool {
    input.is_empty()
        || input.contains(['\'', '"', '(', ')'])
        || input.chars().any(char::is_whitespace)
        || input.eq_ignore_ascii_case("and")
        || input.eq_ignore_ascii_case("or")
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            quote_if_needed(&self.field),
            self.operator.symbol(),
            quote_if_needed(&self.value)
        )
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Condition(cond) => fmt::Display::fmt(cond, f),
            Expression::And { children } => write_group(f, children, " AND "),
            Expression::Or { children } => write_group(f, children, " OR "),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, children: &[Expression], joiner: &str) -> fmt::Result {
    match children {
        [] => Ok(()),
        [only] => fmt::Display::fmt(only, f),
        [first, rest @ ..] => {
            f.write_char('(')?;
            fmt::Display::fmt(first, f)?;
            for child in rest {
                f.write_str(joiner)?;
                fmt::Display::fmt(child, f)?;
            }
            f.write_char(')')
        }
    }
}

impl Expression {
    /// Canonical string form, usable as a new filter input
    pub fn render(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ast::Operator;

    #[test]
    fn test_quote_if_needed_plain() {
        assert_eq!(quote_if_needed("value1"), "value1");
        assert_eq!(quote_if_needed("a=b"), "a=b");
        assert_eq!(quote_if_needed("a.b@c"), "a.b@c");
    }

    #[test]
    fn test_quote_if_needed_whitespace() {
        assert_eq!(quote_if_needed("key 1"), "'key 1'");
        assert_eq!(quote_if_needed("a\tb"), "'a\tb'");
        assert_eq!(quote_if_needed("a\nb"), "'a\nb'");
    }

    #[test]
    fn test_quote_if_needed_quotes() {
        assert_eq!(quote_if_needed("value \"1\""), "'value \"1\"'");
        assert_eq!(quote_if_needed("value '2'"), "'value \\'2\\''");
        assert_eq!(quote_if_needed("it's"), "'it\\'s'");
    }

    #[test]
    fn test_quote_if_needed_structural_words() {
        assert_eq!(quote_if_needed(""), "''");
        assert_eq!(quote_if_needed("("), "'('");
        assert_eq!(quote_if_needed(")"), "')'");
        assert_eq!(quote_if_needed("f(x)"), "'f(x)'");
        assert_eq!(quote_if_needed("AND"), "'AND'");
        assert_eq!(quote_if_needed("or"), "'or'");
        assert_eq!(quote_if_needed("order"), "order");
    }

    #[test]
    fn test_render_groups() {
        let a = Expression::condition("key1", Operator::Equals, "value1");
        let b = Expression::condition("key2", Operator::Contains, "value2");

        assert_eq!(Expression::vacuous().render(), "");
        assert_eq!(Expression::and(vec![]).render(), "");
        assert_eq!(Expression::and(vec![a.clone()]).render(), "key1 = value1");
        assert_eq!(
            Expression::and(vec![a.clone(), b.clone()]).render(),
            "(key1 = value1 AND key2 ~ value2)"
        );
        assert_eq!(
            Expression::or(vec![Expression::and(vec![a.clone(), b.clone()]), a]).render(),
            "((key1 = value1 AND key2 ~ value2) OR key1 = value1)"
        );
    }
}

//! Expression evaluation against records

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use ahash::AHashMap;

use crate::filter::ast::{Condition, Expression, Operator};

/// A record: field name to string value. Missing fields read as `""`.
pub trait Record {
    fn field(&self, name: &str) -> Option<&str>;
}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

impl<K, V> Record for AHashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

/// JSON objects: only string values are visible
impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(serde_json::Value::as_str)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

impl Expression {
    /// Evaluate the expression against a record
    pub fn evaluate<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Expression::Condition(cond) => cond.evaluate(record),
            Expression::And { children } => children.iter().all(|c| c.evaluate(record)),
            Expression::Or { children } => {
                children.is_empty() || children.iter().any(|c| c.evaluate(record))
            }
        }
    }
}

impl Condition {
    pub fn evaluate<R: Record + ?Sized>(&self, record: &R) -> bool {
        let actual = record.field(&self.field).unwrap_or("");
        match self.operator {
            Operator::Equals => actual.to_lowercase() == self.value.to_lowercase(),
            Operator::Contains => actual
                .to_lowercase()
                .contains(&self.value.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::parser::parse;

    fn person() -> HashMap<String, String> {
        HashMap::from([
            ("first_name".to_string(), "Ada".to_string()),
            ("last_name".to_string(), "Lovelace".to_string()),
            ("city".to_string(), "London".to_string()),
            ("bio".to_string(), "Hello World".to_string()),
        ])
    }

    #[test]
    fn test_equals_is_case_insensitive() {
        let record = HashMap::from([("name", "Foo")]);
        assert!(parse("name = foo").unwrap().evaluate(&record));
        assert!(parse("name = FOO").unwrap().evaluate(&record));
        assert!(!parse("name = fo").unwrap().evaluate(&record));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let record = person();
        assert!(parse("bio ~ hello").unwrap().evaluate(&record));
        assert!(parse("bio ~ 'O W'").unwrap().evaluate(&record));
        assert!(!parse("bio ~ goodbye").unwrap().evaluate(&record));
    }

    #[test]
    fn test_missing_field_is_empty() {
        let record = person();
        assert!(parse("email = ''").unwrap().evaluate(&record));
        assert!(parse("email ~ ''").unwrap().evaluate(&record));
        assert!(!parse("email ~ a").unwrap().evaluate(&record));
    }

    #[test]
    fn test_and_or_condition() {
        let record = person();

        let expr = parse("first_name = ada and city = paris").unwrap();
        assert!(!expr.evaluate(&record));

        let expr = parse("first_name = ada and city = paris or last_name ~ love").unwrap();
        assert!(expr.evaluate(&record));

        let expr = parse("first_name = ada and ( city = paris or last_name ~ love )").unwrap();
        assert!(expr.evaluate(&record));

        let expr = parse("first_name = bob or city = paris").unwrap();
        assert!(!expr.evaluate(&record));
    }

    #[test]
    fn test_empty_groups_are_true() {
        let record = person();
        assert!(Expression::vacuous().evaluate(&record));
        assert!(Expression::and(vec![]).evaluate(&record));
        assert!(parse("").unwrap().evaluate(&HashMap::<String, String>::new()));
    }

    #[test]
    fn test_record_impls() {
        let expr = parse("city = london").unwrap();

        let btree = BTreeMap::from([("city".to_string(), "London".to_string())]);
        assert!(expr.evaluate(&btree));

        let mut fast: AHashMap<&str, String> = AHashMap::new();
        fast.insert("city", "LONDON".to_string());
        assert!(expr.evaluate(&fast));

        let json = serde_json::json!({"city": "London", "zip": 12345});
        let object = json.as_object().unwrap();
        assert!(expr.evaluate(object));
        assert!(parse("zip = ''").unwrap().evaluate(object));

        let by_ref: &dyn Record = &btree;
        assert!(expr.evaluate(by_ref));
    }
}

// src/runtime/value.rs
//! Dynamic field values and the records that hold them

use ahash::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::BuildHasher;
use std::num::ParseIntError;
use tracing::trace;

/// Dynamic value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Comparison symbol inside an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Lt,
    Eq,
}

impl Comparison {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Comparison::Gt),
            "<" => Some(Comparison::Lt),
            "=" => Some(Comparison::Eq),
            _ => None,
        }
    }
}

impl Value {
    /// Compare this field value against a rule literal.
    ///
    /// Integers compare numerically with all three symbols, strings only
    /// support `=`. Every other combination is `false`. A literal that is not
    /// an integer when the field is one is reported as an error.
    pub fn compare(
        &self,
        comparison: Option<Comparison>,
        literal: &str,
    ) -> Result<bool, ParseIntError> {
        match self {
            Value::Int(n) => {
                let expected: i64 = literal.parse()?;
                Ok(match comparison {
                    Some(Comparison::Gt) => *n > expected,
                    Some(Comparison::Lt) => *n < expected,
                    Some(Comparison::Eq) => *n == expected,
                    None => false,
                })
            }
            Value::String(s) if comparison == Some(Comparison::Eq) => Ok(s == literal),
            _ => {
                trace!(
                    value_type = self.type_name(),
                    ?comparison,
                    "no comparison defined for field type"
                );
                Ok(false)
            }
        }
    }

    /// Name of the variant, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

// Convenient conversions
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Read access to named fields.
///
/// The evaluator only ever looks fields up through this trait, so any map
/// keyed by field name can be evaluated against.
pub trait Lookup {
    fn lookup(&self, field: &str) -> Option<&Value>;
}

impl<S: BuildHasher> Lookup for std::collections::HashMap<String, Value, S> {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl Lookup for BTreeMap<String, Value> {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, field: &str) -> Option<&Value> {
        (**self).lookup(field)
    }
}

/// Data record evaluated against (never modified by evaluation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            fields: HashMap::default(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Parse a flat JSON object, e.g. `{"age": 35, "department": "Sales"}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Lookup for Record {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_comparison() {
        let v = Value::Int(35);
        assert!(v.compare(Some(Comparison::Gt), "30").unwrap());
        assert!(!v.compare(Some(Comparison::Lt), "30").unwrap());
        assert!(v.compare(Some(Comparison::Eq), "35").unwrap());
        assert!(v.compare(Some(Comparison::Lt), "-1").is_ok_and(|r| !r));
        assert!(!v.compare(None, "35").unwrap());
    }

    #[test]
    fn test_integer_bad_literal() {
        assert!(Value::Int(1).compare(Some(Comparison::Gt), "Sales").is_err());
        assert!(Value::Int(1).compare(Some(Comparison::Eq), "1.5").is_err());
    }

    #[test]
    fn test_string_only_supports_equality() {
        let v = Value::from("Sales");
        assert!(v.compare(Some(Comparison::Eq), "Sales").unwrap());
        assert!(!v.compare(Some(Comparison::Eq), "sales").unwrap());
        assert!(!v.compare(Some(Comparison::Gt), "A").unwrap());
        assert!(!v.compare(Some(Comparison::Lt), "Z").unwrap());
    }

    #[test]
    fn test_other_types_never_match() {
        for v in [Value::Null, Value::Bool(true), Value::Float(5.0)] {
            assert!(!v.compare(Some(Comparison::Eq), "5").unwrap());
            assert!(!v.compare(Some(Comparison::Gt), "1").unwrap());
        }
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(true).type_name(), "bool");
        assert_eq!(Value::from(1).type_name(), "int");
        assert_eq!(Value::from(1.5).type_name(), "float");
        assert_eq!(Value::from("x").type_name(), "string");
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(42.5), Value::Float(42.5));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_record_from_json() {
        let json = r#"{"age": 35, "department": "Sales", "score": 0.5, "vip": true, "note": null}"#;
        let record = Record::from_json(json).unwrap();
        assert_eq!(record.get("age"), Some(&Value::Int(35)));
        assert_eq!(record.get("department"), Some(&Value::from("Sales")));
        assert_eq!(record.get("score"), Some(&Value::Float(0.5)));
        assert_eq!(record.get("vip"), Some(&Value::Bool(true)));
        assert_eq!(record.get("note"), Some(&Value::Null));
    }

    #[test]
    fn test_lookup_impls() {
        let record = Record::new().with_field("age", 35);
        assert_eq!(record.lookup("age"), Some(&Value::Int(35)));
        assert_eq!(record.lookup("missing"), None);

        let mut map = BTreeMap::new();
        map.insert("age".to_string(), Value::Int(1));
        assert_eq!(map.lookup("age"), Some(&Value::Int(1)));

        let fields: Record = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(fields.fields.lookup("b"), Some(&Value::Int(2)));
    }
}

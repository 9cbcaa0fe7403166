//! Open-shaped JSON payloads (literal values) and the keys that address them.
use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// A coding key that is either an object key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawKey {
    Index(usize),
    Name(String),
}

/// Any JSON leaf or container, used where the schema leaves a field's shape open.
///
/// Arm order matters for the untagged decode: integers are tried before
/// doubles, and `Bytes` sits after `Array` so plain JSON never lands there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(OrderedFloat<f64>),
    String(String),
    Array(Vec<ScalarValue>),
    Bytes(Vec<u8>),
    Map(IndexMap<RawKey, ScalarValue>),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl RawKey {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }
}

impl fmt::Display for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for RawKey {
    fn from(name: &str) -> Self { Self::Name(name.to_string()) }
}

impl From<usize> for RawKey {
    fn from(index: usize) -> Self { Self::Index(index) }
}

impl ScalarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scalar(value: serde_json::Value) -> ScalarValue {
        ScalarValue::deserialize(&value).unwrap()
    }

    #[test]
    fn json_leaves_pick_the_narrowest_arm() {
        assert_eq!(scalar(json!(null)), ScalarValue::Null);
        assert_eq!(scalar(json!(true)), ScalarValue::Bool(true));
        assert_eq!(scalar(json!(42)), ScalarValue::Int(42));
        assert_eq!(scalar(json!(1.5)), ScalarValue::Double(OrderedFloat(1.5)));
        assert_eq!(scalar(json!("hi")).as_str(), Some("hi"));
    }

    #[test]
    fn containers_keep_order_and_never_become_bytes() {
        let value = scalar(json!({"b": [1, 2], "a": {}}));
        let ScalarValue::Map(map) = value else { panic!("expected a map") };
        let keys: Vec<_> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(
            map[&RawKey::from("b")],
            ScalarValue::Array(vec![ScalarValue::Int(1), ScalarValue::Int(2)])
        );
    }

    #[test]
    fn raw_keys_render_plainly() {
        assert_eq!(RawKey::from(3).to_string(), "3");
        assert_eq!(RawKey::from("body").to_string(), "body");
        assert_eq!(RawKey::from(3).as_index(), Some(3));
    }
}

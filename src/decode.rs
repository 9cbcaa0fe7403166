//! Path-tracking decoder from a parsed JSON tree into the node model.
//!
//! Every error names the JSON path it happened at so that the diagnostic
//! reporter can go back to the raw tree and show the surrounding object.
pub mod diagnostic;

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ast::AnyNode;
use crate::scalar::{RawKey, ScalarValue};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Location inside the raw JSON tree, rendered like `body[0].declarations[1].id`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsonPath(Vec<RawKey>);

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown node type `{discriminator}` at {path}")]
    UnknownDiscriminator { discriminator: String, path: JsonPath },
    #[error("malformed scalar value at {path}: {source}")]
    MalformedScalar { path: JsonPath, source: serde_json::Error },
    #[error("expected {expected} at {path}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str, path: JsonPath },
    #[error("key `{key}` not found at {path}")]
    KeyNotFound { key: String, path: JsonPath },
    #[error("expected {expected} at {path}, found null")]
    ValueNotFound { expected: &'static str, path: JsonPath },
    #[error("corrupted data at {path}: {message}")]
    DataCorrupted { message: String, path: JsonPath },
}

/// A view of one value of the raw tree together with where it sits.
pub struct Cursor<'a> {
    value: &'a Value,
    path: JsonPath,
}

pub trait Decode: Sized {
    fn decode(cursor: &Cursor<'_>) -> Result<Self, DecodeError>;

    /// Called when the key holding this value is absent from its object.
    fn decode_absent(cursor: &Cursor<'_>, key: &str) -> Result<Self, DecodeError> {
        Err(DecodeError::KeyNotFound {
            key: key.to_string(),
            path: cursor.path.join(key),
        })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

/// Decode a node of any kind, dispatching on its `type` field.
pub fn decode_node(value: &Value) -> Result<AnyNode, DecodeError> {
    Cursor::root(value).decode()
}

impl JsonPath {
    pub fn segments(&self) -> &[RawKey] {
        &self.0
    }

    pub fn join(&self, key: impl Into<RawKey>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    /// Everything but the last segment, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Self(init.to_vec()))
    }

    /// Follow this path through `root`.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(root, |value, segment| match (segment, value) {
            (RawKey::Name(key), Value::Object(map)) => map.get(key),
            (RawKey::Index(index), Value::Array(items)) => items.get(*index),
            _ => None,
        })
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(".");
        }
        for (ix, segment) in self.0.iter().enumerate() {
            match segment {
                RawKey::Index(index) => write!(f, "[{index}]")?,
                RawKey::Name(name) if ix == 0 => f.write_str(name)?,
                RawKey::Name(name) => write!(f, ".{name}")?,
            }
        }
        Ok(())
    }
}

impl DecodeError {
    /// Unknown discriminators and malformed scalars mean the registry or the
    /// parser are out of step; nothing about the input can fix them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnknownDiscriminator { .. } | Self::MalformedScalar { .. })
    }

    pub fn path(&self) -> &JsonPath {
        match self {
            Self::UnknownDiscriminator { path, .. }
            | Self::MalformedScalar { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::KeyNotFound { path, .. }
            | Self::ValueNotFound { path, .. }
            | Self::DataCorrupted { path, .. } => path,
        }
    }
}

impl<'a> Cursor<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self { value, path: JsonPath::default() }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    pub fn decode<T: Decode>(&self) -> Result<T, DecodeError> {
        T::decode(self)
    }

    /// Decode the value under `key`; absent keys defer to [`Decode::decode_absent`].
    pub fn field<T: Decode>(&self, key: &str) -> Result<T, DecodeError> {
        let object = self.object()?;
        match object.get(key) {
            Some(value) => T::decode(&Cursor { value, path: self.path.join(key) }),
            None => T::decode_absent(self, key),
        }
    }

    fn object(&self) -> Result<&'a Map<String, Value>, DecodeError> {
        match self.value {
            Value::Object(map) => Ok(map),
            other => Err(self.mismatch("object", other)),
        }
    }

    fn items(&self) -> Result<&'a [Value], DecodeError> {
        match self.value {
            Value::Array(items) => Ok(items),
            other => Err(self.mismatch("array", other)),
        }
    }

    pub(crate) fn mismatch(&self, expected: &'static str, found: &Value) -> DecodeError {
        if found.is_null() {
            return DecodeError::ValueNotFound { expected, path: self.path.clone() };
        }
        DecodeError::TypeMismatch { expected, found: kind_of(found), path: self.path.clone() }
    }

    pub(crate) fn corrupted(&self, message: String) -> DecodeError {
        DecodeError::DataCorrupted { message, path: self.path.clone() }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ------------------------------ Leaf decoders ------------------------------ //

impl Decode for String {
    fn decode(cursor: &Cursor<'_>) -> Result<Self, DecodeError> {
        match cursor.value {
            Value::String(text) => Ok(text.clone()),
            other => Err(cursor.mismatch("string", other)),
        }
    }
}

impl Decode for bool {
    fn decode(cursor: &Cursor<'_>) -> Result<Self, DecodeError> {
        match cursor.value {
            Value::Bool(flag) => Ok(*flag),
            other => Err(cursor.mismatch("boolean", other)),
        }
    }
}

impl Decode for ScalarValue {
    fn decode(cursor: &Cursor<'_>) -> Result<Self, DecodeError> {
        ScalarValue::deserialize(cursor.value).map_err(|source| DecodeError::MalformedScalar {
            path: cursor.path.clone(),
            source,
        })
    }
}

/// Absent and `null` both decode to `None`.
impl<T: Decode> Decode for Option<T> {
    fn decode(cursor: &Cursor<'_>) -> Result<Self, DecodeError> {
        match cursor.value {
            Value::Null => Ok(None),
            _ => T::decode(cursor).map(Some),
        }
    }

    fn decode_absent(_: &Cursor<'_>, _: &str) -> Result<Self, DecodeError> {
        Ok(None)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(cursor: &Cursor<'_>) -> Result<Self, DecodeError> {
        cursor
            .items()?
            .iter()
            .enumerate()
            .map(|(index, value)| T::decode(&Cursor { value, path: cursor.path.join(index) }))
            .collect()
    }
}

// --------------------------------- Macros ---------------------------------- //

/// Implement [`Decode`] for a node struct from `field: "jsonKey"` pairs.
/// `field: "key" or default` falls back to `default` when the key is absent or null.
macro_rules! impl_decode {
    ($name:ident { $($field:ident: $key:literal $(or $default:expr)?),* $(,)? }) => {
        impl $crate::decode::Decode for $name {
            #[allow(unused_variables)]
            fn decode(
                cursor: &$crate::decode::Cursor<'_>,
            ) -> Result<Self, $crate::decode::DecodeError> {
                Ok(Self {
                    $($field: $crate::decode::impl_decode!(@field cursor, $key $(, $default)?),)*
                })
            }
        }
    };
    (@field $cursor:ident, $key:literal) => {
        $cursor.field($key)?
    };
    (@field $cursor:ident, $key:literal, $default:expr) => {
        $cursor.field::<Option<_>>($key)?.unwrap_or($default)
    };
}

/// Implement [`Decode`] for a closed keyword enumeration.
macro_rules! impl_decode_enum {
    ($name:ident { $($variant:ident = $text:literal),* $(,)? }) => {
        impl $crate::decode::Decode for $name {
            fn decode(
                cursor: &$crate::decode::Cursor<'_>,
            ) -> Result<Self, $crate::decode::DecodeError> {
                let text: String = cursor.decode()?;
                match text.as_str() {
                    $($text => Ok(Self::$variant),)*
                    other => Err(cursor.corrupted(format!(
                        "`{other}` is not a valid {}",
                        stringify!($name),
                    ))),
                }
            }
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

pub(crate) use impl_decode;
pub(crate) use impl_decode_enum;

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;
    use serde_json::json;

    #[test]
    fn paths_render_like_accessors() {
        let path = JsonPath::default().join("body").join(0).join("expression");
        assert_eq!(path.to_string(), "body[0].expression");
        assert_eq!(JsonPath::default().to_string(), ".");
        assert_eq!(path.parent().unwrap().to_string(), "body[0]");
        assert!(JsonPath::default().parent().is_none());
    }

    #[test]
    fn paths_resolve_through_objects_and_arrays() {
        let root = json!({"body": [{"expression": {"name": "x"}}]});
        let path = JsonPath::default().join("body").join(0).join("expression");
        assert_eq!(path.resolve(&root), Some(&json!({"name": "x"})));
        assert_eq!(path.join("missing").resolve(&root), None);
    }

    #[test]
    fn missing_required_keys_report_the_full_path() {
        let error = decode_node(&json!({
            "type": "ExpressionStatement",
            "expression": {"type": "BinaryExpression", "operator": "+", "left": {"type": "Identifier", "name": "a"}},
        }))
        .unwrap_err();
        match &error {
            DecodeError::KeyNotFound { key, path } => {
                assert_eq!(key, "right");
                assert_eq!(path.to_string(), "expression.right");
            }
            other => panic!("unexpected {other}"),
        }
        assert!(!error.is_fatal());
    }

    #[test]
    fn wrong_shapes_are_type_mismatches() {
        let error = decode_node(&json!({"type": "Identifier", "name": 3})).unwrap_err();
        assert!(matches!(error, DecodeError::TypeMismatch { expected: "string", found: "number", .. }));

        let error = decode_node(&json!({"type": "Identifier", "name": null})).unwrap_err();
        assert!(matches!(error, DecodeError::ValueNotFound { expected: "string", .. }));

        let error = decode_node(&json!(["Identifier"])).unwrap_err();
        assert!(matches!(error, DecodeError::TypeMismatch { expected: "object", found: "array", .. }));
    }

    #[test]
    fn null_and_absent_optionals_are_none() {
        let node = decode_node(&json!({"type": "ReturnStatement", "argument": null})).unwrap();
        assert!(matches!(node.node(), Node::ReturnStatement(ret) if ret.argument.is_none()));
        let node = decode_node(&json!({"type": "ReturnStatement"})).unwrap();
        assert!(matches!(node.node(), Node::ReturnStatement(ret) if ret.argument.is_none()));
    }

    #[test]
    fn array_holes_decode_as_none() {
        let node = decode_node(&json!({
            "type": "ArrayExpression",
            "elements": [{"type": "Literal", "value": 1, "raw": "1"}, null],
        }))
        .unwrap();
        let Node::ArrayExpression(array) = node.node() else { panic!() };
        assert!(array.elements[0].is_some());
        assert!(array.elements[1].is_none());
    }

    #[test]
    fn nested_errors_carry_indices() {
        let error = decode_node(&json!({
            "type": "Program",
            "sourceType": "script",
            "body": [
                {"type": "EmptyStatement"},
                {"type": "ExpressionStatement", "expression": {"type": "Mystery"}},
            ],
        }))
        .unwrap_err();
        assert_eq!(error.path().to_string(), "body[1].expression");
        assert!(error.is_fatal());
    }
}

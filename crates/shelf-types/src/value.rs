use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Ordered mapping of field name to value. Insertion order is preserved.
pub type Fields = IndexMap<String, Value>;

/// The values a book field may hold.
///
/// Arrays are deliberately absent: documents in the collection are flat
/// records with optional nested mappings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(Fields),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Equality used by filters: numbers compare by value across the
    /// integer/float split, everything else structurally.
    pub fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => (*a as f64) == *b,
            _ => self == other,
        }
    }

    /// Convert a JSON value, rejecting arrays. `path` names the field for
    /// error reporting.
    pub fn from_json(path: &str, json: serde_json::Value) -> Result<Self, TypeError> {
        Ok(match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(_) => {
                return Err(TypeError::UnsupportedValue {
                    field: path.to_string(),
                    kind: "array",
                })
            }
            serde_json::Value::Object(map) => {
                let mut fields = Fields::with_capacity(map.len());
                for (key, value) in map {
                    let nested = format!("{path}.{key}");
                    let value = Self::from_json(&nested, value)?;
                    fields.insert(key, value);
                }
                Self::Map(fields)
            }
        })
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Convert a JSON request body into [`Fields`]. The body must be an object.
pub fn fields_from_json(json: serde_json::Value) -> Result<Fields, TypeError> {
    let map = match json {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => return Err(TypeError::NotAnObject("null")),
        serde_json::Value::Bool(_) => return Err(TypeError::NotAnObject("bool")),
        serde_json::Value::Number(_) => return Err(TypeError::NotAnObject("number")),
        serde_json::Value::String(_) => return Err(TypeError::NotAnObject("string")),
        serde_json::Value::Array(_) => return Err(TypeError::NotAnObject("array")),
    };
    let mut fields = Fields::with_capacity(map.len());
    for (key, value) in map {
        let value = Value::from_json(&key, value)?;
        fields.insert(key, value);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_match_across_int_and_float() {
        assert!(Value::Int(1960).matches(&Value::Float(1960.0)));
        assert!(Value::Float(1960.0).matches(&Value::Int(1960)));
        assert!(!Value::Int(1960).matches(&Value::Float(1960.5)));
        assert!(!Value::Int(1).matches(&Value::String("1".into())));
    }

    #[test]
    fn from_json_keeps_integers_integral() {
        assert_eq!(Value::from_json("year", json!(1869)).unwrap(), Value::Int(1869));
        assert_eq!(Value::from_json("price", json!(9.5)).unwrap(), Value::Float(9.5));
    }

    #[test]
    fn arrays_are_rejected_with_their_path() {
        let err = fields_from_json(json!({"meta": {"tags": ["a"]}})).unwrap_err();
        assert_eq!(
            err,
            TypeError::UnsupportedValue {
                field: "meta.tags".into(),
                kind: "array"
            }
        );
    }

    #[test]
    fn body_must_be_an_object() {
        assert_eq!(
            fields_from_json(json!([1, 2])).unwrap_err(),
            TypeError::NotAnObject("array")
        );
        assert_eq!(
            fields_from_json(json!("title")).unwrap_err(),
            TypeError::NotAnObject("string")
        );
    }

    #[test]
    fn field_order_is_preserved() {
        let fields = fields_from_json(json!({"title": "X", "author": "Y", "bookId": 7})).unwrap();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["title", "author", "bookId"]);
    }

    #[test]
    fn serializes_untagged() {
        let mut fields = Fields::new();
        fields.insert("title".into(), "War and Peace".into());
        fields.insert("year".into(), 1869i64.into());
        fields.insert("inPrint".into(), true.into());
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"title":"War and Peace","year":1869,"inPrint":true}"#);
    }

    #[test]
    fn deserializes_nested_maps() {
        let fields: Fields =
            serde_json::from_str(r#"{"title":"X","publisher":{"name":"P","founded":1900}}"#)
                .unwrap();
        match &fields["publisher"] {
            Value::Map(inner) => assert_eq!(inner["founded"], Value::Int(1900)),
            other => panic!("expected map, got {other:?}"),
        }
    }
}

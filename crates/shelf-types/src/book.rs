use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::TypeError;
use crate::id::BookId;
use crate::value::{Fields, Value};

/// Name of the distinguished identifier field.
pub const ID_FIELD: &str = "_id";

/// Remove the identifier field from `fields`, keeping the order of the rest.
pub fn take_id(fields: &mut Fields) -> Option<Value> {
    fields.shift_remove(ID_FIELD)
}

/// A book document as returned to callers.
///
/// `fields` never contains [`ID_FIELD`]; the identifier lives in `id` and is
/// rendered first, in hex, when the book is serialized.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "Fields")]
pub struct Book {
    pub id: BookId,
    pub fields: Fields,
}

impl Book {
    /// Build a book, dropping any identifier field carried in `fields`.
    pub fn new(id: BookId, mut fields: Fields) -> Self {
        take_id(&mut fields);
        Self { id, fields }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The full document with `_id` rendered as a hex string in first position.
    pub fn into_fields(self) -> Fields {
        let mut out = Fields::with_capacity(self.fields.len() + 1);
        out.insert(ID_FIELD.to_string(), Value::String(self.id.to_hex()));
        out.extend(self.fields);
        out
    }
}

impl TryFrom<Fields> for Book {
    type Error = TypeError;

    fn try_from(mut fields: Fields) -> Result<Self, Self::Error> {
        let id = match take_id(&mut fields) {
            Some(Value::String(s)) => BookId::parse(&s)?,
            Some(other) => return Err(TypeError::IdNotAString(other.kind())),
            None => return Err(TypeError::MissingId),
        };
        Ok(Self { id, fields })
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

//! Domain types for the todo service.
//!
//! # Design
//! Todos live in the store as loose BSON documents. These types are the typed
//! view of them: `NewTodo::to_document` and `Todo::try_from(&Document)` are
//! the only places that know the document layout. Over JSON the id travels
//! as its 24-digit hex form under `_id`.

use std::fmt;
use std::str::FromStr;

use bson::document::ValueAccessError;
use bson::oid::ObjectId;
use bson::{doc, Document};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StoreError;

pub const ID_KEY: &str = "_id";
pub const OWNER_KEY: &str = "owner";
pub const CATEGORY_KEY: &str = "category";
pub const BODY_KEY: &str = "body";
pub const STATUS_KEY: &str = "status";

/// Store-generated identifier of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// A fresh, unique id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for TodoId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

/// Error for strings that are not a 24-digit hex ObjectId.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTodoId(pub String);

impl fmt::Display for InvalidTodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid todo id", self.0)
    }
}

impl std::error::Error for InvalidTodoId {}

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidTodoId(s.to_string()));
        }
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidTodoId(s.to_string()))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single todo as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub owner: String,
    pub category: String,
    pub body: String,
    pub status: bool,
}

/// Payload for creating a todo. Any `_id` in the input is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub owner: String,
    pub category: String,
    pub body: String,
    #[serde(default)]
    pub status: bool,
}

impl NewTodo {
    pub fn new(owner: &str, category: &str, body: &str, status: bool) -> Self {
        Self {
            owner: owner.to_string(),
            category: category.to_string(),
            body: body.to_string(),
            status,
        }
    }

    /// Native document form, without an `_id`.
    pub fn to_document(&self) -> Document {
        doc! {
            OWNER_KEY: self.owner.as_str(),
            CATEGORY_KEY: self.category.as_str(),
            BODY_KEY: self.body.as_str(),
            STATUS_KEY: self.status,
        }
    }

    pub fn with_id(self, id: TodoId) -> Todo {
        Todo {
            id,
            owner: self.owner,
            category: self.category,
            body: self.body,
            status: self.status,
        }
    }
}

impl TryFrom<&Document> for Todo {
    type Error = StoreError;

    /// Missing text fields decode as empty and a missing status as `false`;
    /// a field holding the wrong BSON type is rejected.
    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        let id = doc
            .get_object_id(ID_KEY)
            .map_err(|e| StoreError::Malformed(format!("`{ID_KEY}`: {e}")))?;
        Ok(Todo {
            id: TodoId(id),
            owner: string_field(doc, OWNER_KEY)?,
            category: string_field(doc, CATEGORY_KEY)?,
            body: string_field(doc, BODY_KEY)?,
            status: match doc.get_bool(STATUS_KEY) {
                Ok(status) => status,
                Err(ValueAccessError::NotPresent) => false,
                Err(e) => return Err(StoreError::Malformed(format!("`{STATUS_KEY}`: {e}"))),
            },
        })
    }
}

fn string_field(doc: &Document, key: &str) -> Result<String, StoreError> {
    match doc.get_str(key) {
        Ok(value) => Ok(value.to_string()),
        Err(ValueAccessError::NotPresent) => Ok(String::new()),
        Err(e) => Err(StoreError::Malformed(format!("`{key}`: {e}"))),
    }
}

//! Identifier values read from entity instances.
//!
//! Polymorphic relationships store an id next to the type name. Depending on
//! the entity's key scheme that id is a sequential integer, a UUID, or an
//! arbitrary string (ULIDs travel as strings).
//!
//! Values serialize tagged (`{"type": "uuid", "value": "..."}`) so a string
//! key that happens to look like a UUID keeps its variant.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of an identifier attribute.
///
/// # Examples
///
/// ```
/// use morphkey::KeyValue;
///
/// let id = KeyValue::from(42_i64);
/// let ulid = KeyValue::from("01ARZ3NDEKTSV4RRFFQ69G5FAV");
///
/// assert!(id.is_int());
/// assert_eq!(ulid.as_str(), Some("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum KeyValue {
    /// Sequential integer key.
    Int(i64),
    /// UUID key.
    Uuid(Uuid),
    /// ULID or any other string key.
    String(String),
}

impl KeyValue {
    /// Returns true for integer keys.
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns true for UUID keys.
    pub const fn is_uuid(&self) -> bool {
        matches!(self, Self::Uuid(_))
    }

    /// Returns true for string keys (ULIDs included).
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// The integer key, if this is one.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The UUID key, if this is one.
    pub const fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(v) => Some(v),
            _ => None,
        }
    }

    /// The string key, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a human-readable kind name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Uuid(_) => "uuid",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<i32> for KeyValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for KeyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for KeyValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<Uuid> for KeyValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<String> for KeyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for KeyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

//! Entity types and identifier naming.
//!
//! A polymorphic relationship stores a `(type, id)` pair. [`TypeName`] is the
//! canonical name of the type half, [`FieldName`] names the attribute the id
//! half is read from, and [`Entity`] is how the registry asks an instance
//! about itself.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::KeyValue;

/// Field name used when an entity does not declare its own key.
pub const DEFAULT_KEY_NAME: &str = "id";

/// Canonical, globally unique name of an entity type.
///
/// # Examples
///
/// ```
/// use morphkey::TypeName;
///
/// let name = TypeName::new("App\\Models\\User");
/// assert_eq!(name.as_str(), "App\\Models\\User");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Wraps a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrows the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps into the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for TypeName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Name of the identifier attribute on instances of a type (`id`, `uuid`, ...).
///
/// The registry never checks that the field actually exists on the type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Wraps a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrows the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps into the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for FieldName {
    fn default() -> Self {
        Self(DEFAULT_KEY_NAME.to_string())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Descriptor for an entity instance taking part in polymorphic relationships.
///
/// Implementors report their own canonical type name, the key they declare
/// for themselves, and read access to their attributes by name.
///
/// # Examples
///
/// ```
/// use morphkey::{Entity, KeyValue};
///
/// struct Organization {
///     ulid: String,
/// }
///
/// impl Entity for Organization {
///     fn type_name(&self) -> &str {
///         "Organization"
///     }
///
///     fn default_key_name(&self) -> &str {
///         "ulid"
///     }
///
///     fn attribute(&self, field: &str) -> Option<KeyValue> {
///         match field {
///             "ulid" => Some(KeyValue::from(self.ulid.as_str())),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Entity {
    /// Canonical name of this instance's concrete type.
    fn type_name(&self) -> &str;

    /// Key the type declares for itself when no mapping overrides it.
    fn default_key_name(&self) -> &str {
        DEFAULT_KEY_NAME
    }

    /// Reads an attribute by field name. `None` when the attribute is unset.
    fn attribute(&self, field: &str) -> Option<KeyValue>;
}

impl<E: Entity + ?Sized> Entity for &E {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn default_key_name(&self) -> &str {
        (**self).default_key_name()
    }

    fn attribute(&self, field: &str) -> Option<KeyValue> {
        (**self).attribute(field)
    }
}

impl<E: Entity + ?Sized> Entity for Box<E> {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn default_key_name(&self) -> &str {
        (**self).default_key_name()
    }

    fn attribute(&self, field: &str) -> Option<KeyValue> {
        (**self).attribute(field)
    }
}

//! Known entity types and their declared default keys.
//!
//! When a type has no explicit mapping and the registry is permissive, the
//! key falls back to whatever the type declares for itself. For an instance
//! the instance answers directly; for a bare type name the registry asks a
//! [`DefaultKeyProvider`] instead of constructing anything at lookup time.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::entity::{Entity, FieldName, TypeName};

/// Answers "which key does this type declare for itself?" by type name.
///
/// A provider also decides which names count as *known* types: alias
/// resolution leaves known names untouched and only consults the alias table
/// for the rest.
pub trait DefaultKeyProvider: Send + Sync {
    /// Returns true if `type_name` names a type this provider knows.
    fn contains(&self, type_name: &str) -> bool;

    /// Declared default key for `type_name`, or `None` for unknown types.
    fn default_key_name(&self, type_name: &str) -> Option<FieldName>;
}

/// Thread-safe in-memory catalog of entity types.
///
/// # Examples
///
/// ```
/// use morphkey::{DefaultKeyProvider, TypeCatalog};
///
/// let catalog = TypeCatalog::new();
/// catalog.register("Organization", "ulid");
///
/// assert!(catalog.contains("Organization"));
/// assert_eq!(catalog.default_key_name("Organization").unwrap(), "ulid");
/// ```
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: RwLock<HashMap<TypeName, FieldName>>,
}

impl TypeCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type with its declared default key. Re-registering a type
    /// replaces its key.
    pub fn register(&self, type_name: impl Into<TypeName>, default_key: impl Into<FieldName>) {
        let type_name = type_name.into();
        let default_key = default_key.into();
        tracing::debug!(%type_name, %default_key, "registered entity type");
        self.types.write().insert(type_name, default_key);
    }

    /// Registers `E` by reading its type name and default key from
    /// `E::default()`.
    ///
    /// The default instance is built once, here, and dropped. `Default` for a
    /// registered entity must be cheap and free of side effects.
    pub fn register_entity<E: Entity + Default>(&self) {
        let probe = E::default();
        self.register(probe.type_name(), probe.default_key_name());
    }

    /// Builder-style variant of [`TypeCatalog::register`].
    #[must_use]
    pub fn with_type(self, type_name: impl Into<TypeName>, default_key: impl Into<FieldName>) -> Self {
        self.register(type_name, default_key);
        self
    }

    /// Builder-style variant of [`TypeCatalog::register_entity`].
    #[must_use]
    pub fn with_entity<E: Entity + Default>(self) -> Self {
        self.register_entity::<E>();
        self
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Returns true if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl DefaultKeyProvider for TypeCatalog {
    fn contains(&self, type_name: &str) -> bool {
        self.types.read().contains_key(type_name)
    }

    fn default_key_name(&self, type_name: &str) -> Option<FieldName> {
        self.types.read().get(type_name).cloned()
    }
}

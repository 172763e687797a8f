//! The key registry.
//!
//! [`KeyRegistry`] answers, for any entity type taking part in a polymorphic
//! relationship, which identifier field is its key. It runs in one of two
//! modes:
//!
//! - **Permissive** (initial): unmapped types fall back to the key the type
//!   declares for itself.
//! - **Enforcing**: unmapped types are a [`KeyError::Violation`].
//!
//! `require_mapping`/`enforce` switch to enforcing; only `reset` switches
//! back, and it empties the map at the same time.

mod state;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::alias::{self, AliasTable, MorphMap};
use crate::catalog::{DefaultKeyProvider, TypeCatalog};
use crate::entity::{Entity, FieldName, TypeName};
use crate::error::{KeyError, KeyResult};
use crate::value::KeyValue;

use self::state::{KeyMapState, Lookup};

/// Thread-safe registry of per-type key mappings.
///
/// The registry is an ordinary value: construct one, share it with `Arc`, and
/// give tests their own instance.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use morphkey::{KeyRegistry, TypeCatalog};
///
/// let types = TypeCatalog::new()
///     .with_type("User", "id")
///     .with_type("Comment", "id");
///
/// let registry = KeyRegistry::builder().types(Arc::new(types)).build();
/// registry.map([("User", "uuid"), ("Organization", "ulid")]);
///
/// assert_eq!(registry.get_key_from_class("User").unwrap(), "uuid");
/// assert_eq!(registry.get_key_from_class("Comment").unwrap(), "id");
/// ```
pub struct KeyRegistry {
    state: RwLock<KeyMapState>,
    types: Arc<dyn DefaultKeyProvider>,
    aliases: Arc<dyn AliasTable>,
}

impl KeyRegistry {
    /// Creates a permissive registry with no known types and no aliases.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts a [`KeyRegistryBuilder`] for wiring in collaborators.
    #[must_use]
    pub fn builder() -> KeyRegistryBuilder {
        KeyRegistryBuilder::new()
    }

    /// Merges `entries` into the key map. Existing types are overwritten.
    pub fn map<I, T, F>(&self, entries: I)
    where
        I: IntoIterator<Item = (T, F)>,
        T: Into<TypeName>,
        F: Into<FieldName>,
    {
        let entries = collect_entries(entries);
        let mut state = self.state.write();
        let count = state.merge(entries);
        tracing::debug!(count, total = state.len(), "merged key mappings");
    }

    /// Merges `entries` and turns enforcement on.
    ///
    /// Both changes are made under one write lock.
    pub fn enforce<I, T, F>(&self, entries: I)
    where
        I: IntoIterator<Item = (T, F)>,
        T: Into<TypeName>,
        F: Into<FieldName>,
    {
        let entries = collect_entries(entries);
        let mut state = self.state.write();
        let count = state.merge(entries);
        state.require_mapping();
        tracing::debug!(count, total = state.len(), "merged key mappings, enforcement on");
    }

    /// Turns enforcement on without touching the key map.
    pub fn require_mapping(&self) {
        self.state.write().require_mapping();
        tracing::debug!("key map enforcement on");
    }

    /// Clears every mapping and turns enforcement off.
    pub fn reset(&self) {
        self.state.write().reset();
        tracing::debug!("key registry reset");
    }

    /// Returns true once enforcement is on.
    #[must_use]
    pub fn is_enforcing(&self) -> bool {
        self.state.read().is_enforcing()
    }

    /// Returns true if `type_name` has an explicit mapping.
    ///
    /// The name is taken as-is; aliases are not resolved.
    #[must_use]
    pub fn has(&self, type_name: &str) -> bool {
        self.state.read().contains(type_name)
    }

    /// Returns true if the entity's own type has an explicit mapping.
    #[must_use]
    pub fn has_entity<E: Entity + ?Sized>(&self, entity: &E) -> bool {
        self.has(entity.type_name())
    }

    /// Snapshot of every mapping.
    #[must_use]
    pub fn all(&self) -> HashMap<TypeName, FieldName> {
        self.state.read().snapshot()
    }

    /// Number of mapped types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// Returns true if no type is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key field for an entity instance.
    ///
    /// # Errors
    ///
    /// [`KeyError::Violation`] when enforcing and the entity's type is unmapped.
    pub fn get_key<E: Entity + ?Sized>(&self, entity: &E) -> KeyResult<FieldName> {
        let type_name = entity.type_name();
        match self.lookup(type_name) {
            Lookup::Mapped(field) => Ok(field),
            Lookup::Violation => Err(violation(type_name)),
            Lookup::Fallback => Ok(FieldName::new(entity.default_key_name())),
        }
    }

    /// Value of the entity's key field.
    ///
    /// `Ok(None)` means the key resolved but the entity has no value for it.
    ///
    /// # Errors
    ///
    /// Same as [`KeyRegistry::get_key`].
    pub fn get_value<E: Entity + ?Sized>(&self, entity: &E) -> KeyResult<Option<KeyValue>> {
        let key = self.get_key(entity)?;
        Ok(entity.attribute(key.as_str()))
    }

    /// Key field for a type name or alias.
    ///
    /// # Errors
    ///
    /// - [`KeyError::Violation`] when enforcing and the resolved type is unmapped.
    /// - [`KeyError::UnknownType`] when permissive, unmapped, and the type
    ///   provider does not know the resolved type.
    pub fn get_key_from_class(&self, identifier: &str) -> KeyResult<FieldName> {
        let resolved = self.resolve_alias(identifier);
        match self.lookup(resolved.as_str()) {
            Lookup::Mapped(field) => Ok(field),
            Lookup::Violation => Err(violation(resolved.as_str())),
            Lookup::Fallback => self.types.default_key_name(resolved.as_str()).ok_or_else(|| {
                tracing::debug!(%identifier, %resolved, "no default key for unknown type");
                KeyError::unknown_type(resolved)
            }),
        }
    }

    /// Resolves an alias to its canonical type name.
    ///
    /// Known types and unaliased identifiers come back unchanged.
    #[must_use]
    pub fn resolve_alias(&self, identifier: &str) -> TypeName {
        alias::resolve(identifier, self.types.as_ref(), self.aliases.as_ref())
    }

    fn lookup(&self, type_name: &str) -> Lookup {
        self.state.read().lookup(type_name)
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("KeyRegistry")
            .field("mappings", &state.len())
            .field("enforcing", &state.is_enforcing())
            .finish_non_exhaustive()
    }
}

fn collect_entries<I, T, F>(entries: I) -> Vec<(TypeName, FieldName)>
where
    I: IntoIterator<Item = (T, F)>,
    T: Into<TypeName>,
    F: Into<FieldName>,
{
    entries
        .into_iter()
        .map(|(type_name, field)| (type_name.into(), field.into()))
        .collect()
}

fn violation(type_name: &str) -> KeyError {
    tracing::debug!(%type_name, "unmapped type while enforcing");
    KeyError::violation(type_name)
}

/// Builder for [`KeyRegistry`].
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use morphkey::{KeyRegistry, MorphMap, TypeCatalog};
///
/// let aliases = Arc::new(MorphMap::new());
/// aliases.insert("Acct", "Account");
///
/// let registry = KeyRegistry::builder()
///     .types(Arc::new(TypeCatalog::new().with_type("Account", "id")))
///     .aliases(aliases)
///     .build();
///
/// assert_eq!(registry.resolve_alias("Acct"), "Account");
/// ```
#[derive(Default)]
pub struct KeyRegistryBuilder {
    types: Option<Arc<dyn DefaultKeyProvider>>,
    aliases: Option<Arc<dyn AliasTable>>,
}

impl KeyRegistryBuilder {
    /// Creates a builder with both collaborators unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider of known types and their declared default keys.
    ///
    /// Default: an empty [`TypeCatalog`].
    #[must_use]
    pub fn types(mut self, types: Arc<dyn DefaultKeyProvider>) -> Self {
        self.types = Some(types);
        self
    }

    /// Alias table consulted by type-name lookups.
    ///
    /// Default: an empty [`MorphMap`].
    #[must_use]
    pub fn aliases(mut self, aliases: Arc<dyn AliasTable>) -> Self {
        self.aliases = Some(aliases);
        self
    }

    /// Builds an empty, permissive registry.
    #[must_use]
    pub fn build(self) -> KeyRegistry {
        KeyRegistry {
            state: RwLock::new(KeyMapState::default()),
            types: self.types.unwrap_or_else(|| Arc::new(TypeCatalog::new())),
            aliases: self.aliases.unwrap_or_else(|| Arc::new(MorphMap::new())),
        }
    }
}

impl fmt::Debug for KeyRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRegistryBuilder")
            .field("types", &self.types.is_some())
            .field("aliases", &self.aliases.is_some())
            .finish()
    }
}

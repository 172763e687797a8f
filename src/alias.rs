//! Type aliases ("morph map") and alias resolution.
//!
//! Polymorphic `type` columns often hold a short alias such as `"user"`
//! instead of a full type name. The registry stores mappings by canonical
//! name only, so type-name based lookups resolve aliases first.

use std::collections::HashMap;
use std::hash::BuildHasher;

use parking_lot::RwLock;

use crate::catalog::DefaultKeyProvider;
use crate::entity::TypeName;

/// Read-only view of an alias → canonical type table.
pub trait AliasTable: Send + Sync {
    /// Canonical type for `alias`, if the table has one.
    fn lookup(&self, alias: &str) -> Option<TypeName>;
}

impl<S: BuildHasher + Send + Sync> AliasTable for HashMap<String, String, S> {
    fn lookup(&self, alias: &str) -> Option<TypeName> {
        self.get(alias).map(|name| TypeName::new(name.as_str()))
    }
}

impl<S: BuildHasher + Send + Sync> AliasTable for HashMap<String, TypeName, S> {
    fn lookup(&self, alias: &str) -> Option<TypeName> {
        self.get(alias).cloned()
    }
}

/// Thread-safe in-memory alias table.
///
/// # Examples
///
/// ```
/// use morphkey::{AliasTable, MorphMap};
///
/// let aliases = MorphMap::new();
/// aliases.insert("Acct", "App\\Models\\Account");
///
/// assert_eq!(aliases.lookup("Acct").unwrap(), "App\\Models\\Account");
/// assert_eq!(aliases.get_alias("App\\Models\\Account").as_deref(), Some("Acct"));
/// ```
#[derive(Debug, Default)]
pub struct MorphMap {
    aliases: RwLock<HashMap<String, TypeName>>,
}

impl MorphMap {
    /// Create a new empty alias table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `alias` to `type_name`, replacing any previous binding.
    pub fn insert(&self, alias: impl Into<String>, type_name: impl Into<TypeName>) {
        let alias = alias.into();
        let type_name = type_name.into();
        tracing::debug!(%alias, %type_name, "registered type alias");
        self.aliases.write().insert(alias, type_name);
    }

    /// Binds every `(alias, type)` pair. Later pairs win.
    pub fn extend<I, A, T>(&self, entries: I)
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<TypeName>,
    {
        let mut aliases = self.aliases.write();
        for (alias, type_name) in entries {
            aliases.insert(alias.into(), type_name.into());
        }
    }

    /// Reverse lookup: an alias bound to `type_name`.
    ///
    /// When several aliases point at the same type the lexicographically
    /// smallest is returned so the answer is stable.
    #[must_use]
    pub fn get_alias(&self, type_name: &str) -> Option<String> {
        self.aliases
            .read()
            .iter()
            .filter(|(_, target)| target.as_str() == type_name)
            .map(|(alias, _)| alias)
            .min()
            .cloned()
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.read().len()
    }

    /// Returns true if no alias is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.read().is_empty()
    }

    /// Removes every alias.
    pub fn clear(&self) {
        self.aliases.write().clear();
    }
}

impl AliasTable for MorphMap {
    fn lookup(&self, alias: &str) -> Option<TypeName> {
        self.aliases.read().get(alias).cloned()
    }
}

/// Resolves `identifier` to a canonical type name.
///
/// Known types are returned unchanged. Otherwise the alias table is
/// consulted, and an identifier that is neither known nor aliased comes back
/// as-is; deciding what an unknown type means is up to the caller.
#[must_use]
pub fn resolve(
    identifier: &str,
    types: &dyn DefaultKeyProvider,
    aliases: &dyn AliasTable,
) -> TypeName {
    if types.contains(identifier) {
        return TypeName::new(identifier);
    }

    aliases
        .lookup(identifier)
        .unwrap_or_else(|| TypeName::new(identifier))
}

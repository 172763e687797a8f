//! Key map and enforcement flag.
//!
//! Both live in one struct so the registry can guard them with a single lock:
//! a reader sees either the state before a `reset` or the state after it,
//! never an emptied map paired with a stale flag.

use std::collections::HashMap;

use crate::entity::{FieldName, TypeName};

/// Outcome of looking a canonical type up in the key map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// Explicit mapping exists.
    Mapped(FieldName),
    /// Unmapped while enforcing.
    Violation,
    /// Unmapped while permissive; caller falls back to the type's own key.
    Fallback,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct KeyMapState {
    key_map: HashMap<TypeName, FieldName>,
    enforcing: bool,
}

impl KeyMapState {
    /// Merges `entries`, overwriting existing keys.
    pub(crate) fn merge<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (TypeName, FieldName)>,
    {
        let mut count = 0;
        for (type_name, field) in entries {
            self.key_map.insert(type_name, field);
            count += 1;
        }
        count
    }

    pub(crate) fn require_mapping(&mut self) {
        self.enforcing = true;
    }

    pub(crate) fn reset(&mut self) {
        self.key_map.clear();
        self.enforcing = false;
    }

    pub(crate) fn contains(&self, type_name: &str) -> bool {
        self.key_map.contains_key(type_name)
    }

    pub(crate) const fn is_enforcing(&self) -> bool {
        self.enforcing
    }

    pub(crate) fn len(&self) -> usize {
        self.key_map.len()
    }

    pub(crate) fn snapshot(&self) -> HashMap<TypeName, FieldName> {
        self.key_map.clone()
    }

    pub(crate) fn lookup(&self, type_name: &str) -> Lookup {
        match self.key_map.get(type_name) {
            Some(field) => Lookup::Mapped(field.clone()),
            None if self.enforcing => Lookup::Violation,
            None => Lookup::Fallback,
        }
    }
}

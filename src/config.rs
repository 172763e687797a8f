//! Key-map configuration.
//!
//! Applications usually declare their mappings in a config file rather than
//! in code:
//!
//! ```json
//! {
//!     "defaultMorphType": "ulid",
//!     "morphKeyMap": { "App\\Models\\User": "uuid" },
//!     "enforceMorphKeyMap": {}
//! }
//! ```
//!
//! `morphKeyMap` is applied permissively, `enforceMorphKeyMap` turns on
//! enforcement. At most one of the two may be non-empty.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::{FieldName, TypeName};
use crate::error::ConfigurationError;
use crate::registry::KeyRegistry;
use crate::schema::{MorphColumns, MorphType};

/// Which of the two mapping sets a configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMapStrategy<'a> {
    /// Neither set is configured.
    None,
    /// Permissive mappings.
    Map(&'a BTreeMap<TypeName, FieldName>),
    /// Enforced mappings.
    Enforce(&'a BTreeMap<TypeName, FieldName>),
}

/// Parsed key-map configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MorphConfig {
    /// Id column kind used by [`MorphConfig::columns`]. Unrecognised values
    /// fall back to `ulid`.
    #[serde(deserialize_with = "lenient_morph_type")]
    pub default_morph_type: MorphType,

    /// Permissive mappings. `null` or a non-object value counts as empty.
    #[serde(deserialize_with = "lenient_key_map")]
    pub morph_key_map: BTreeMap<TypeName, FieldName>,

    /// Enforced mappings. `null` or a non-object value counts as empty.
    #[serde(deserialize_with = "lenient_key_map")]
    pub enforce_morph_key_map: BTreeMap<TypeName, FieldName>,
}

impl MorphConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Parse`] on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the configuration stored under `section` in a larger document.
    ///
    /// Lets a host application keep several libraries' key maps in one file,
    /// each under its own prefix. A missing section is an empty config.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Parse`] if the section has the wrong shape.
    pub fn from_section(document: &serde_json::Value, section: &str) -> Result<Self, ConfigurationError> {
        match document.get(section) {
            Some(value) => Ok(Self::deserialize(value)?),
            None => Ok(Self::default()),
        }
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Io`] if the file cannot be read,
    /// [`ConfigurationError::Parse`] on malformed JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Picks the configured mapping set.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::ConflictingKeyMaps`] when both sets are non-empty.
    pub fn strategy(&self) -> Result<KeyMapStrategy<'_>, ConfigurationError> {
        match (self.morph_key_map.is_empty(), self.enforce_morph_key_map.is_empty()) {
            (false, false) => Err(ConfigurationError::ConflictingKeyMaps),
            (true, false) => Ok(KeyMapStrategy::Enforce(&self.enforce_morph_key_map)),
            (false, true) => Ok(KeyMapStrategy::Map(&self.morph_key_map)),
            (true, true) => Ok(KeyMapStrategy::None),
        }
    }

    /// Checks that at most one mapping set is configured.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::ConflictingKeyMaps`] when both sets are non-empty.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.strategy().map(|_| ())
    }

    /// Applies the configured mapping set to `registry`.
    ///
    /// Nothing is applied when validation fails.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::ConflictingKeyMaps`] when both sets are non-empty.
    pub fn apply(&self, registry: &KeyRegistry) -> Result<(), ConfigurationError> {
        match self.strategy()? {
            KeyMapStrategy::Enforce(entries) => {
                registry.enforce(entries.iter().map(|(t, f)| (t.clone(), f.clone())));
            }
            KeyMapStrategy::Map(entries) => {
                registry.map(entries.iter().map(|(t, f)| (t.clone(), f.clone())));
            }
            KeyMapStrategy::None => {
                tracing::debug!("no key mappings configured");
            }
        }
        Ok(())
    }

    /// Polymorphic column pair for `name` on `table` using the configured
    /// morph type.
    #[must_use]
    pub fn columns(&self, table: &str, name: &str) -> MorphColumns {
        MorphColumns::new(table, name, self.default_morph_type)
    }

    /// Nullable variant of [`MorphConfig::columns`].
    #[must_use]
    pub fn nullable_columns(&self, table: &str, name: &str) -> MorphColumns {
        self.columns(table, name).nullable()
    }
}

fn lenient_morph_type<'de, D>(deserializer: D) -> Result<MorphType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw {
        Some(value) => value.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default morph type");
            MorphType::default()
        }),
        None => MorphType::default(),
    })
}

fn lenient_key_map<'de, D>(deserializer: D) -> Result<BTreeMap<TypeName, FieldName>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(BTreeMap::new()),
        value @ serde_json::Value::Object(_) => {
            serde_json::from_value(value).map_err(serde::de::Error::custom)
        }
        other => {
            tracing::warn!(value = %other, "ignoring key map that is not an object");
            Ok(BTreeMap::new())
        }
    }
}

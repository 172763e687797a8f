//! Error types for morphkey.
//!
//! All errors are strongly typed using thiserror so callers can match on the
//! specific failure (an enforced violation vs. an unknown type vs. a bad
//! configuration) and decide how to surface it.

use std::path::PathBuf;

use thiserror::Error;

use crate::entity::TypeName;

/// Errors raised while loading or applying key-map configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Both mapping sets are non-empty.
    #[error(
        "Cannot configure both \"morphKeyMap\" and \"enforceMorphKeyMap\" simultaneously. \
         Choose one: use \"morphKeyMap\" for optional mapping or \"enforceMorphKeyMap\" for strict enforcement."
    )]
    ConflictingKeyMaps,

    /// The configuration file could not be read.
    #[error("Failed to read configuration from {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid configuration JSON.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level error type for key resolution.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Enforcement is on and the type has no mapping.
    #[error(
        "Model [{type_name}] is not mapped in the morph key registry. \
         Use KeyRegistry::map() or KeyRegistry::enforce() to define key mappings."
    )]
    Violation {
        /// The unmapped type.
        type_name: TypeName,
    },

    /// Permissive lookup for a type the provider does not know.
    #[error("Type [{identifier}] is not a known entity type")]
    UnknownType {
        /// The resolved identifier.
        identifier: TypeName,
    },

    /// Wrapped configuration failure.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl KeyError {
    /// Creates a violation for an unmapped type.
    #[must_use]
    pub fn violation(type_name: impl Into<TypeName>) -> Self {
        Self::Violation {
            type_name: type_name.into(),
        }
    }

    /// Creates an unknown-type error.
    #[must_use]
    pub fn unknown_type(identifier: impl Into<TypeName>) -> Self {
        Self::UnknownType {
            identifier: identifier.into(),
        }
    }

    /// Returns true if this is an enforcement violation.
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        matches!(self, Self::Violation { .. })
    }

    /// Returns true if this is an unknown-type error.
    #[must_use]
    pub const fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// The unmapped type carried by a violation.
    #[must_use]
    pub const fn violated_type(&self) -> Option<&TypeName> {
        match self {
            Self::Violation { type_name } => Some(type_name),
            _ => None,
        }
    }
}

/// Result type alias for key resolution.
pub type KeyResult<T> = Result<T, KeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_message() {
        let err = KeyError::violation("App\\Models\\Post");
        let msg = format!("{err}");
        assert!(msg.contains("[App\\Models\\Post]"));
        assert!(msg.contains("not mapped"));
        assert!(err.is_violation());
        assert_eq!(err.violated_type().unwrap(), "App\\Models\\Post");
    }

    #[test]
    fn test_unknown_type_message() {
        let err = KeyError::unknown_type("Ghost");
        assert!(err.is_unknown_type());
        assert!(!err.is_violation());
        assert!(err.violated_type().is_none());
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn test_conflicting_key_maps_message() {
        let err = ConfigurationError::ConflictingKeyMaps;
        let msg = err.to_string();
        assert!(msg.contains("morphKeyMap"));
        assert!(msg.contains("enforceMorphKeyMap"));
    }

    #[test]
    fn test_key_error_from_configuration() {
        let err: KeyError = ConfigurationError::ConflictingKeyMaps.into();
        assert!(err.is_configuration());
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigurationError = source.into();
        assert!(err.to_string().contains("Failed to parse"));
    }
}

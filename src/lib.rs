//! # morphkey - Key resolution for polymorphic relationships
//!
//! A polymorphic relationship stores a `(type, id)` pair that can point at
//! instances of different entity types. When those types use different key
//! schemes (sequential integers, UUIDs, ULIDs, plain strings) something has
//! to decide which field to read per type. morphkey is that single source of
//! truth.
//!
//! ## Core Concepts
//!
//! - **KeyRegistry**: per-type key mappings plus an enforcement switch
//! - **Entity**: how an instance reports its type, declared key, and attributes
//! - **DefaultKeyProvider**: declared keys by type name, for lookups without an instance
//! - **AliasTable**: short aliases (`"user"`) for canonical type names
//! - **MorphConfig**: mappings loaded from a JSON configuration file
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use morphkey::{KeyRegistry, MorphMap, TypeCatalog};
//!
//! let types = TypeCatalog::new()
//!     .with_type("App\\Models\\User", "id")
//!     .with_type("App\\Models\\Organization", "ulid");
//!
//! let aliases = Arc::new(MorphMap::new());
//! aliases.insert("user", "App\\Models\\User");
//!
//! let registry = KeyRegistry::builder()
//!     .types(Arc::new(types))
//!     .aliases(aliases)
//!     .build();
//!
//! registry.enforce([("App\\Models\\User", "uuid")]);
//!
//! assert_eq!(registry.get_key_from_class("user").unwrap(), "uuid");
//! assert!(registry
//!     .get_key_from_class("App\\Models\\Organization")
//!     .unwrap_err()
//!     .is_violation());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alias;
pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod registry;
pub mod schema;
pub mod value;

// Re-export primary types at crate root for convenience
pub use alias::{AliasTable, MorphMap};
pub use catalog::{DefaultKeyProvider, TypeCatalog};
pub use config::{KeyMapStrategy, MorphConfig};
pub use entity::{Entity, FieldName, TypeName, DEFAULT_KEY_NAME};
pub use error::{ConfigurationError, KeyError, KeyResult};
pub use registry::{KeyRegistry, KeyRegistryBuilder};
pub use schema::{ColumnDefinition, ColumnKind, MorphColumns, MorphType, ParseMorphTypeError};
pub use value::KeyValue;

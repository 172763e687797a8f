//! Column layout for polymorphic relationships.
//!
//! A polymorphic relationship named `commentable` is stored as two columns,
//! `commentable_type` and `commentable_id`, with a composite index over both
//! prefixed by the table name (`comments_commentable_type_commentable_id_index`).
//! The kind of the id column depends on the key scheme of the types it
//! points at. This module only describes that layout; creating the columns is
//! left to whatever migration tool the application uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Key scheme of the id column in a polymorphic pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphType {
    /// Auto-incrementing integer keys.
    Numeric,
    /// UUID keys (36 chars).
    Uuid,
    /// ULID keys (26 chars, sortable).
    #[default]
    Ulid,
    /// Any key type, stored as a string.
    String,
}

impl MorphType {
    /// Lowercase name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Uuid => "uuid",
            Self::Ulid => "ulid",
            Self::String => "string",
        }
    }

    /// Kind of the `{name}_id` column for this scheme.
    #[must_use]
    pub const fn id_column_kind(self) -> ColumnKind {
        match self {
            Self::Numeric => ColumnKind::UnsignedBigInteger,
            Self::Uuid => ColumnKind::Uuid,
            Self::Ulid => ColumnKind::Ulid,
            Self::String => ColumnKind::String,
        }
    }
}

impl fmt::Display for MorphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised morph type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown morph type '{0}' (expected numeric, uuid, ulid or string)")]
pub struct ParseMorphTypeError(String);

impl FromStr for MorphType {
    type Err = ParseMorphTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(Self::Numeric),
            "uuid" => Ok(Self::Uuid),
            "ulid" => Ok(Self::Ulid),
            "string" => Ok(Self::String),
            other => Err(ParseMorphTypeError(other.to_string())),
        }
    }
}

/// Storage kind of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// 64-bit unsigned integer.
    UnsignedBigInteger,
    /// Native UUID column.
    Uuid,
    /// 26-char ULID column.
    Ulid,
    /// Variable-length string.
    String,
}

/// One column of a polymorphic pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Storage kind.
    pub kind: ColumnKind,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

/// The `{name}_type` / `{name}_id` column pair and its index.
///
/// # Examples
///
/// ```
/// use morphkey::{ColumnKind, MorphColumns, MorphType};
///
/// let columns = MorphColumns::new("comments", "commentable", MorphType::Uuid).nullable();
///
/// assert_eq!(columns.type_column.name, "commentable_type");
/// assert_eq!(columns.id_column.kind, ColumnKind::Uuid);
/// assert!(columns.id_column.nullable);
/// assert_eq!(columns.index_name, "comments_commentable_type_commentable_id_index");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphColumns {
    /// Key scheme of the id column.
    pub morph_type: MorphType,
    /// `{name}_type`, always a string column.
    pub type_column: ColumnDefinition,
    /// `{name}_id`, typed per [`MorphType`].
    pub id_column: ColumnDefinition,
    /// Composite index over both columns, `{table}_{name}_type_{name}_id_index`.
    pub index_name: String,
}

impl MorphColumns {
    /// Describes the `name` relationship columns on `table`.
    #[must_use]
    pub fn new(table: &str, name: &str, morph_type: MorphType) -> Self {
        let type_column = format!("{name}_type");
        let id_column = format!("{name}_id");
        Self {
            morph_type,
            index_name: format!("{table}_{type_column}_{id_column}_index"),
            type_column: ColumnDefinition {
                name: type_column,
                kind: ColumnKind::String,
                nullable: false,
            },
            id_column: ColumnDefinition {
                name: id_column,
                kind: morph_type.id_column_kind(),
                nullable: false,
            },
        }
    }

    /// Marks both columns nullable, for optional relationships.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.type_column.nullable = true;
        self.id_column.nullable = true;
        self
    }

    /// Both columns, type column first.
    #[must_use]
    pub fn columns(&self) -> [&ColumnDefinition; 2] {
        [&self.type_column, &self.id_column]
    }
}

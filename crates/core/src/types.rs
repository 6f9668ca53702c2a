//! Core types used throughout ddlforge
//!
//! The dialect selector, the semantic kinds a field can have, and the
//! referential actions a foreign key can carry. These are shared by the
//! catalog model, the resolver and the emitter.

use crate::error::{DdlError, DdlResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Dialect
// ============================================================================

/// Supported SQL dialects
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Sqlite,
    #[default]
    Postgres,
    MySql,
    SqlServer,
}

impl Dialect {
    /// Selector string, as accepted by [`Dialect::parse`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::SqlServer => "sqlserver",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "SQLite",
            Dialect::Postgres => "PostgreSQL",
            Dialect::MySql => "MySQL",
            Dialect::SqlServer => "SQL Server",
        }
    }

    /// Parse a dialect selector.
    ///
    /// Only the four selector strings are accepted (ASCII case-insensitive);
    /// anything else is an [`DdlError::UnsupportedDialect`].
    pub fn parse(value: &str) -> DdlResult<Self> {
        Dialect::all()
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| DdlError::UnsupportedDialect(value.to_string()))
    }

    /// Get all dialects
    pub fn all() -> &'static [Dialect] {
        &[
            Dialect::Sqlite,
            Dialect::Postgres,
            Dialect::MySql,
            Dialect::SqlServer,
        ]
    }
}

impl FromStr for Dialect {
    type Err = DdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Field Kinds
// ============================================================================

/// Semantic kind of a field, as reported by the front end
///
/// The kind picks the default column type for each dialect. `Any` has no
/// default and needs an explicit `type=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    #[default]
    String,
    Time,
    Boolean,
    Json,
    Uuid,
    Binary,
    Array,
    Enum,
    Any,
}

impl FieldKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::String => "string",
            FieldKind::Time => "time",
            FieldKind::Boolean => "boolean",
            FieldKind::Json => "json",
            FieldKind::Uuid => "uuid",
            FieldKind::Binary => "binary",
            FieldKind::Array => "array",
            FieldKind::Enum => "enum",
            FieldKind::Any => "any",
        }
    }

    /// Whether `len=<n>` is meaningful for this kind
    pub fn accepts_length(&self) -> bool {
        matches!(self, FieldKind::String | FieldKind::Enum)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Referential Actions
// ============================================================================

/// Actions for foreign key constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    /// Propagate the change to referencing rows
    Cascade,
    /// Set the referencing columns to NULL
    SetNull,
    /// Refuse the change while referencing rows exist
    Restrict,
    /// Database default
    NoAction,
    /// Set the referencing columns to their default
    SetDefault,
}

impl ReferentialAction {
    /// Parse an action as written in an attribute (`cascade`, `set_null`, `setnull`, ...)
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| *c != '_' && *c != ' ')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "cascade" => Some(ReferentialAction::Cascade),
            "setnull" => Some(ReferentialAction::SetNull),
            "restrict" => Some(ReferentialAction::Restrict),
            "noaction" => Some(ReferentialAction::NoAction),
            "setdefault" => Some(ReferentialAction::SetDefault),
            _ => None,
        }
    }

    /// Get SQL keyword
    pub fn to_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }

    /// Get all referential actions
    pub fn all() -> &'static [ReferentialAction] {
        &[
            ReferentialAction::Cascade,
            ReferentialAction::SetNull,
            ReferentialAction::Restrict,
            ReferentialAction::NoAction,
            ReferentialAction::SetDefault,
        ]
    }
}

impl std::fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

// ============================================================================
// Tests
// ============================================================================

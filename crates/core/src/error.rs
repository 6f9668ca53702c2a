//! Error types for ddlforge
//!
//! Every stage of a generation run (interpretation, validation, dialect
//! resolution, ordering) reports failures through [`DdlError`]. Errors are
//! never recovered inside the core: the first one aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ddlforge
#[derive(Debug, Error)]
pub enum DdlError {
    // ========================================================================
    // Catalog Build Errors
    // ========================================================================
    /// A per-field or per-table attribute token could not be interpreted
    #[error("Invalid attribute on '{table}.{field}': {message} (token `{token}`)")]
    AttributeParse {
        table: String,
        field: String,
        token: String,
        message: String,
    },

    /// Two tables share a name
    #[error("Duplicate table name: '{0}' is declared more than once")]
    DuplicateTable(String),

    /// Two columns in one table share a name
    #[error("Duplicate column name: '{column}' is declared more than once in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A foreign key points at a table or column that does not exist
    #[error("Dangling reference from '{table}.{column}': {target} {reason}")]
    DanglingReference {
        table: String,
        column: String,
        target: String,
        reason: String,
    },

    /// A constraint or index names a column its own table does not have
    #[error("Unknown column '{column}' in table '{table}' (used by {context})")]
    UnknownColumn {
        table: String,
        column: String,
        context: String,
    },

    /// A composite foreign key does not line up with the referenced key
    #[error(
        "Foreign key ({columns}) on table '{table}' has {found} column(s) but '{target}' expects {expected}"
    )]
    ForeignKeyArity {
        table: String,
        columns: String,
        target: String,
        expected: usize,
        found: usize,
    },

    /// Tables reference each other in a loop that cannot be created in one pass
    #[error("Cyclic foreign key dependency between tables: {}", .tables.join(", "))]
    CyclicDependency { tables: Vec<String> },

    // ========================================================================
    // Dialect Errors
    // ========================================================================
    /// The dialect selector is not one of the supported dialects
    #[error("Unsupported dialect: '{0}' (expected one of sqlite, postgres, mysql, sqlserver)")]
    UnsupportedDialect(String),

    /// No column type could be determined for the active dialect
    #[error("Column '{table}.{column}' has no type for dialect {dialect}; add type=<...>")]
    UnresolvedType {
        table: String,
        column: String,
        dialect: String,
    },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization / Configuration Errors
    // ========================================================================
    /// JSON (de)serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DdlError {
    /// Create an attribute parse error
    pub fn attribute(
        table: impl Into<String>,
        field: impl Into<String>,
        token: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        DdlError::AttributeParse {
            table: table.into(),
            field: field.into(),
            token: token.into(),
            message: message.into(),
        }
    }

    /// Create a dangling reference error
    pub fn dangling(
        table: impl Into<String>,
        column: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DdlError::DanglingReference {
            table: table.into(),
            column: column.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown column error
    pub fn unknown_column(
        table: impl Into<String>,
        column: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        DdlError::UnknownColumn {
            table: table.into(),
            column: column.into(),
            context: context.into(),
        }
    }

    /// Check if this error comes from catalog building or validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DdlError::AttributeParse { .. }
                | DdlError::DuplicateTable(_)
                | DdlError::DuplicateColumn { .. }
                | DdlError::DanglingReference { .. }
                | DdlError::UnknownColumn { .. }
                | DdlError::ForeignKeyArity { .. }
                | DdlError::CyclicDependency { .. }
                | DdlError::UnresolvedType { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            DdlError::Io(_)
                | DdlError::FileRead { .. }
                | DdlError::FileWrite { .. }
                | DdlError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using DdlError
pub type DdlResult<T> = Result<T, DdlError>;

// ============================================================================
// Tests
// ============================================================================

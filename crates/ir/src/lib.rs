//! # ddlforge IR (Intermediate Representation)
//!
//! This crate turns table descriptors into a validated, dialect-agnostic
//! catalog.
//!
//! ## Core Concepts
//!
//! - **TableDescriptor**: raw input, a table name plus fields with attribute strings
//! - **Catalog**: the interpreted schema, tables in declaration order
//! - **Column**: base settings plus per-dialect overrides
//! - **Table**: columns, keys, indexes and foreign keys (by name, never by pointer)
//!
//! The pipeline inside this crate is
//! [`interpret`] → [`validate_catalog`]; dialect resolution and SQL emission
//! live in `ddlforge_codegen`.

// Module declarations
pub mod attribute;
pub mod catalog;
pub mod column;
pub mod descriptor;
pub mod interpreter;
pub mod serialization;
pub mod table;
pub mod validation;

// Re-export commonly used types at crate root
pub use attribute::{Attribute, TokenError, parse_attributes};
pub use catalog::Catalog;
pub use column::{Column, ColumnSettings, Identity};
pub use descriptor::{FieldDescriptor, TableDescriptor};
pub use interpreter::{interpret, interpret_table};
pub use serialization::{CatalogFile, descriptors_from_str, load_descriptors, save_descriptors};
pub use table::{ForeignKey, Index, IndexPart, PrimaryKey, Table, UniqueConstraint, same_name};
pub use validation::{ValidationRule, Validator, validate_catalog};

// Re-export core types that are commonly used with IR
pub use ddlforge_core::{DdlError, DdlResult, Dialect, FieldKind, ReferentialAction};

/// Current schema version for descriptor files
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interpret and validate descriptors in one step
pub fn build_catalog(descriptors: &[TableDescriptor]) -> DdlResult<Catalog> {
    let catalog = interpret(descriptors)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

// ============================================================================
// Tests
// ============================================================================

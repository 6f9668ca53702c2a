//! # Migration Generation
//!
//! This module renders a [`GenerationContext`] into SQL batches. Tables are
//! already resolved for the active dialect and ordered by dependency
//! (referenced tables first).
//!
//! ## Generated Files
//!
//! ```text
//! {prefix}_{schema_name}.sql       CREATE TABLE / ALTER TABLE / CREATE INDEX
//! {prefix}_{schema_name}.undo.sql  DROP TABLE IF EXISTS, reverse order
//! ```
//!
//! ## Features
//!
//! - Columns in declared order, then primary key, unique and foreign key
//!   constraints
//! - Self-referencing foreign keys added with `ALTER TABLE` right after the
//!   owning table when the dialect allows it
//! - `CREATE [UNIQUE] INDEX` with dialect-specific method placement
//! - Deterministic constraint names and minimal identifier quoting

pub mod sql;
pub mod undo;

pub use sql::generate_schema;
pub use undo::generate_undo;

use crate::GeneratedFile;
use crate::context::GenerationContext;

/// Render every batch the configuration asks for, in apply order
pub fn generate_migrations(ctx: &GenerationContext) -> Vec<GeneratedFile> {
    let mut files = vec![generate_schema(ctx)];
    if ctx.config.include_undo {
        files.push(generate_undo(ctx));
    }
    files
}

/// Comment header shared by every batch
pub(crate) fn header(ctx: &GenerationContext, title: &str) -> String {
    format!(
        "-- {} generated by ddlforge for {}\n-- Tables: {}\n",
        title,
        ctx.dialect().display_name(),
        ctx.table_count()
    )
}

//! The catalog: every table of one generation run
//!
//! Tables keep their declaration order, which the orderer uses to break
//! ties. Names are unique, compared ASCII case-insensitively.

use crate::table::{Table, same_name};
use ddlforge_core::{DdlError, DdlResult};

/// In-memory schema description for one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tables: Vec<Table>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table, rejecting duplicate names
    pub fn add_table(&mut self, table: Table) -> DdlResult<()> {
        if self.has_table(&table.name) {
            return Err(DdlError::DuplicateTable(table.name));
        }
        self.tables.push(table);
        Ok(())
    }

    /// Builder form of [`Catalog::add_table`]
    pub fn with_table(mut self, table: Table) -> DdlResult<Self> {
        self.add_table(table)?;
        Ok(self)
    }

    /// All tables in declaration order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Get a table by name (case-insensitive)
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| same_name(&t.name, name))
    }

    /// Declaration index of a table
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| same_name(&t.name, name))
    }

    /// Check if a table exists
    pub fn has_table(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

//! Table definitions
//!
//! A [`Table`] owns its columns, keys, indexes and foreign keys by value.
//! Foreign keys name their target table and columns; they never hold a
//! pointer to another table.

use crate::column::Column;
use ddlforge_core::{DdlError, DdlResult, Dialect, ReferentialAction};

/// Case-insensitive identifier comparison used for every name lookup
pub fn same_name(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

// ============================================================================
// Keys
// ============================================================================

/// Primary key over one or more columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
}

impl PrimaryKey {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// True for a single-column key on `column`
    pub fn is_sole(&self, column: &str) -> bool {
        self.columns.len() == 1 && same_name(&self.columns[0], column)
    }
}

/// UNIQUE constraint over one or more columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueConstraint {
    pub columns: Vec<String>,
}

impl UniqueConstraint {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Index
// ============================================================================

/// One element of an index: a column or a free-form expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexPart {
    Column(String),
    Expression(String),
}

impl IndexPart {
    /// Classify a raw part: plain identifiers are columns, anything else is an expression
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let is_identifier = raw
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_identifier {
            IndexPart::Column(raw.to_string())
        } else {
            IndexPart::Expression(raw.to_string())
        }
    }

    /// Column name, if this part is a column
    pub fn column(&self) -> Option<&str> {
        match self {
            IndexPart::Column(name) => Some(name),
            IndexPart::Expression(_) => None,
        }
    }
}

/// Secondary index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Indexed columns or expressions, in order
    pub parts: Vec<IndexPart>,

    /// UNIQUE index
    pub unique: bool,

    /// Index method (`using=...`), e.g. GIST
    pub method: Option<String>,

    /// Dialects this index exists under (empty means all)
    pub dialects: Vec<Dialect>,
}

impl Index {
    /// Plain index over the given columns
    pub fn on_columns(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            parts: columns
                .into_iter()
                .map(|c| IndexPart::Column(c.into()))
                .collect(),
            unique: false,
            method: None,
            dialects: Vec::new(),
        }
    }

    /// Whether this index is declared for `dialect`
    pub fn applies_to(&self, dialect: Dialect) -> bool {
        self.dialects.is_empty() || self.dialects.contains(&dialect)
    }

    /// Column names among the parts
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(IndexPart::column)
    }
}

// ============================================================================
// ForeignKey
// ============================================================================

/// Foreign key constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Owning columns on this table
    pub columns: Vec<String>,

    /// Referenced table name
    pub target_table: String,

    /// Referenced columns; empty means the target's primary key
    pub target_columns: Vec<String>,

    pub on_update: Option<ReferentialAction>,
    pub on_delete: Option<ReferentialAction>,
}

impl ForeignKey {
    /// Single-column foreign key to the target's primary key
    pub fn new(column: impl Into<String>, target_table: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
            target_table: target_table.into(),
            target_columns: Vec::new(),
            on_update: None,
            on_delete: None,
        }
    }

    /// Reference explicit target columns
    pub fn with_target_columns(
        mut self,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.target_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this key points back at its owning table
    pub fn is_self_reference(&self, owner: &str) -> bool {
        same_name(&self.target_table, owner)
    }

    /// Owning columns joined for messages
    pub fn column_list(&self) -> String {
        self.columns.join(", ")
    }
}

// ============================================================================
// Table
// ============================================================================

/// A table of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name as declared
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<Column>,

    pub primary_key: Option<PrimaryKey>,
    pub unique_constraints: Vec<UniqueConstraint>,
    pub indexes: Vec<Index>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            unique_constraints: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Append a column, rejecting duplicate names
    pub fn add_column(&mut self, column: Column) -> DdlResult<()> {
        if self.has_column(&column.name) {
            return Err(DdlError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Builder form of [`Table::add_column`]
    pub fn with_column(mut self, column: Column) -> DdlResult<Self> {
        self.add_column(column)?;
        Ok(self)
    }

    pub fn with_primary_key(mut self, key: PrimaryKey) -> Self {
        self.primary_key = Some(key);
        self
    }

    pub fn with_foreign_key(mut self, key: ForeignKey) -> Self {
        self.foreign_keys.push(key);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Get a column by name (case-insensitive)
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| same_name(&c.name, name))
    }

    /// Check if the table has a column
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Declared column names, in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Primary key column names (empty when there is no primary key)
    pub fn primary_key_columns(&self) -> &[String] {
        self.primary_key
            .as_ref()
            .map(|pk| pk.columns.as_slice())
            .unwrap_or(&[])
    }

    /// Names of other tables this table references, deduplicated, in declaration order
    pub fn dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = Vec::new();
        for fk in &self.foreign_keys {
            if fk.is_self_reference(&self.name) {
                continue;
            }
            if !deps.iter().any(|d| same_name(d, &fk.target_table)) {
                deps.push(&fk.target_table);
            }
        }
        deps
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

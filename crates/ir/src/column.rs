//! Column definitions
//!
//! A [`Column`] keeps its generic settings and, separately, one override
//! record per dialect. Nothing is resolved here: the resolver merges the two
//! for the active dialect.

use ddlforge_core::{Dialect, FieldKind};
use std::collections::BTreeMap;

// ============================================================================
// Identity
// ============================================================================

/// Identity column flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Database generates a value unless one is supplied
    ByDefault,
    /// Database always generates the value
    Always,
}

// ============================================================================
// ColumnSettings
// ============================================================================

/// Dialect-overridable column settings.
///
/// Every field is optional so an override record only carries what it
/// changes; [`ColumnSettings::merged_with`] lays an override over the base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSettings {
    /// Explicit column type (`type=...`)
    pub type_name: Option<String>,

    /// Length for string columns (`len=...`)
    pub length: Option<u32>,

    /// NOT NULL
    pub not_null: Option<bool>,

    /// Default value expression, verbatim
    pub default: Option<String>,

    /// Auto-increment (honoured by dialects that use it)
    pub auto_increment: Option<bool>,

    /// Identity (honoured by dialects that use it)
    pub identity: Option<Identity>,

    /// MySQL `ON UPDATE CURRENT_TIMESTAMP`
    pub on_update_current_timestamp: Option<bool>,
}

impl ColumnSettings {
    /// Lay `over` on top of `self`; any value set in `over` wins
    pub fn merged_with(&self, over: &ColumnSettings) -> ColumnSettings {
        ColumnSettings {
            type_name: over.type_name.clone().or_else(|| self.type_name.clone()),
            length: over.length.or(self.length),
            not_null: over.not_null.or(self.not_null),
            default: over.default.clone().or_else(|| self.default.clone()),
            auto_increment: over.auto_increment.or(self.auto_increment),
            identity: over.identity.or(self.identity),
            on_update_current_timestamp: over
                .on_update_current_timestamp
                .or(self.on_update_current_timestamp),
        }
    }

    /// True when nothing is set
    pub fn is_empty(&self) -> bool {
        *self == ColumnSettings::default()
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null.unwrap_or(false)
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment.unwrap_or(false)
    }

    pub fn has_on_update_current_timestamp(&self) -> bool {
        self.on_update_current_timestamp.unwrap_or(false)
    }
}

// ============================================================================
// Column
// ============================================================================

/// A column of a table, dialect-agnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name as declared
    pub name: String,

    /// Semantic kind of the field
    pub kind: FieldKind,

    /// Settings that apply under every dialect
    pub settings: ColumnSettings,

    /// Per-dialect overrides
    pub overrides: BTreeMap<Dialect, ColumnSettings>,

    /// Dialects this column exists under (empty means all)
    pub dialects: Vec<Dialect>,
}

impl Column {
    /// Create a column with no settings
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            settings: ColumnSettings::default(),
            overrides: BTreeMap::new(),
            dialects: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Mark the column NOT NULL
    pub fn not_null(mut self) -> Self {
        self.settings.not_null = Some(true);
        self
    }

    /// Set an explicit type
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.settings.type_name = Some(type_name.into());
        self
    }

    /// Set a default expression
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.settings.default = Some(default.into());
        self
    }

    /// Add (or extend) an override for one dialect
    pub fn with_override(mut self, dialect: Dialect, settings: ColumnSettings) -> Self {
        let merged = self
            .overrides
            .get(&dialect)
            .map(|existing| existing.merged_with(&settings))
            .unwrap_or(settings);
        self.overrides.insert(dialect, merged);
        self
    }

    /// Restrict the column to the given dialects
    pub fn only_for(mut self, dialects: impl IntoIterator<Item = Dialect>) -> Self {
        self.dialects = dialects.into_iter().collect();
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Whether this column exists under `dialect`
    pub fn exists_in(&self, dialect: Dialect) -> bool {
        self.dialects.is_empty() || self.dialects.contains(&dialect)
    }

    /// Whether this column is restricted to a subset of dialects
    pub fn is_dialect_restricted(&self) -> bool {
        !self.dialects.is_empty()
    }

    /// Effective settings for `dialect`
    pub fn settings_for(&self, dialect: Dialect) -> ColumnSettings {
        match self.overrides.get(&dialect) {
            Some(over) => self.settings.merged_with(over),
            None => self.settings.clone(),
        }
    }

    /// Mutable override record for `dialect`, created on first use
    pub fn override_mut(&mut self, dialect: Dialect) -> &mut ColumnSettings {
        self.overrides.entry(dialect).or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

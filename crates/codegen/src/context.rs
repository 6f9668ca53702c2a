//! # Generation Context
//!
//! The `GenerationContext` holds everything the migration emitters need:
//! the dialect profile, the resolved tables already in creation order, the
//! warnings collected so far and the filename prefix. It is built once per
//! run from a validated catalog and shared by reference with each emitter.

use ddlforge_core::{DdlResult, Dialect};
use ddlforge_ir::Catalog;

use crate::dialect::DialectProfile;
use crate::order::dependency_order;
use crate::resolve::{ResolvedTable, resolve_catalog};
use crate::{BatchKind, GeneratorConfig};

/// Timestamp format used when no explicit prefix is configured
pub const PREFIX_FORMAT: &str = "%Y%m%d%H%M%S";

// ============================================================================
// GenerationContext
// ============================================================================

/// Context carrying all information needed to emit one migration set
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Generator configuration
    pub config: GeneratorConfig,

    /// Active dialect profile
    profile: &'static DialectProfile,

    /// Resolved tables, referenced tables first
    tables: Vec<ResolvedTable>,

    /// Warnings from resolution
    warnings: Vec<String>,

    /// Prefix for migration file names
    pub migration_prefix: String,
}

impl GenerationContext {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Resolve and order a validated catalog for the configured dialect
    pub fn from_catalog(catalog: &Catalog, config: GeneratorConfig) -> DdlResult<Self> {
        let resolved = resolve_catalog(catalog, config.dialect)?;
        let tables = dependency_order(resolved.tables)?;

        let migration_prefix = match &config.filename_prefix {
            Some(prefix) => prefix.clone(),
            None => chrono::Utc::now().format(PREFIX_FORMAT).to_string(),
        };

        Ok(Self {
            profile: DialectProfile::for_dialect(config.dialect),
            config,
            tables,
            warnings: resolved.warnings,
            migration_prefix,
        })
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    pub fn dialect(&self) -> Dialect {
        self.profile.dialect
    }

    pub fn profile(&self) -> &'static DialectProfile {
        self.profile
    }

    /// Tables in creation order
    pub fn tables(&self) -> &[ResolvedTable] {
        &self.tables
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Quote an identifier for the active dialect
    pub fn quote(&self, name: &str) -> String {
        self.profile.quote_ident(name)
    }

    // ====================================================================
    // Naming
    // ====================================================================

    /// `<prefix>_<schema_name>.sql` or `<prefix>_<schema_name>.undo.sql`
    pub fn migration_filename(&self, kind: BatchKind) -> String {
        format!(
            "{}_{}{}",
            self.migration_prefix,
            self.config.schema_name,
            kind.suffix()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

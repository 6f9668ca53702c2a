//! # Migration Generator Orchestrator
//!
//! The `Generator` is the top-level entry point. It takes table descriptors
//! and a [`GeneratorConfig`], builds and validates the catalog, resolves it
//! for the configured dialect and renders the SQL batches.
//!
//! ## Pipeline
//!
//! ```text
//! &[TableDescriptor] + GeneratorConfig
//!         │
//!         ▼
//!   interpret() → validate_catalog()           (ddlforge_ir)
//!         │
//!         ▼
//!   GenerationContext::from_catalog()          resolve + dependency order
//!         │
//!         ├──► migrations::generate_schema()   → up batch
//!         ├──► migrations::generate_undo()     → undo batch
//!         │
//!         ▼
//!   MigrationSet { dialect, files, warnings }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ddlforge_codegen::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::for_dialect("postgres")?.with_prefix("0001");
//! let set = Generator::new(config).generate(&descriptors)?;
//! for file in &set.files {
//!     println!("-- {}\n{}", file.name, file.content);
//! }
//! ```

use ddlforge_core::DdlResult;
use ddlforge_ir::{Catalog, TableDescriptor, build_catalog};
use std::path::Path;

use crate::context::GenerationContext;
use crate::migrations;
use crate::{BatchKind, GeneratorConfig, MigrationSet};

/// Warning attached to a run over an empty catalog
pub const EMPTY_CATALOG_WARNING: &str = "no tables declared";

// ============================================================================
// Generator
// ============================================================================

/// Top-level migration generator.
///
/// Stateless aside from its configuration; every call to
/// [`generate`](Generator::generate) is an independent run.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Run the full pipeline on table descriptors.
    ///
    /// # Errors
    ///
    /// The first attribute, validation, resolution or ordering error aborts
    /// the run; nothing is returned partially.
    pub fn generate(&self, descriptors: &[TableDescriptor]) -> DdlResult<MigrationSet> {
        self.config.validate()?;
        let catalog = build_catalog(descriptors)?;
        tracing::debug!(tables = catalog.len(), "catalog built and validated");
        self.generate_catalog(&catalog)
    }

    /// Render an already validated catalog.
    pub fn generate_catalog(&self, catalog: &Catalog) -> DdlResult<MigrationSet> {
        let ctx = GenerationContext::from_catalog(catalog, self.config.clone())?;

        let mut output = MigrationSet::new(ctx.dialect());
        if catalog.is_empty() {
            tracing::warn!("{}", EMPTY_CATALOG_WARNING);
            output.add_warning(EMPTY_CATALOG_WARNING);
        }
        for warning in ctx.warnings() {
            output.add_warning(warning.clone());
        }
        for file in migrations::generate_migrations(&ctx) {
            output.add_file(file);
        }

        tracing::info!(
            dialect = %output.dialect,
            tables = ctx.table_count(),
            files = output.file_count(),
            warnings = output.warnings.len(),
            "migration generation complete",
        );

        Ok(output)
    }

    // ====================================================================
    // Convenience: generate and write to disk
    // ====================================================================

    /// Generate and write every file into `output_dir`.
    pub fn generate_and_write(
        &self,
        descriptors: &[TableDescriptor],
        output_dir: impl AsRef<Path>,
    ) -> DdlResult<MigrationSet> {
        let output = self.generate(descriptors)?;
        output.write_to_disk(&output_dir)?;
        tracing::info!(
            output_dir = %output_dir.as_ref().display(),
            files = output.file_count(),
            "files written to disk",
        );
        Ok(output)
    }
}

// ============================================================================
// Standalone convenience function
// ============================================================================

/// Generate migrations for a dialect selector.
///
/// The selector is parsed before any catalog work, so an unknown dialect
/// fails with `UnsupportedDialect` even when the descriptors are broken too.
pub fn generate(descriptors: &[TableDescriptor], dialect: &str) -> DdlResult<MigrationSet> {
    let config = GeneratorConfig::for_dialect(dialect)?;
    Generator::new(config).generate(descriptors)
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a completed generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Dialect display name.
    pub dialect: String,
    /// Number of tables created by the up batch.
    pub tables: usize,
    /// Number of files generated.
    pub total_files: usize,
    /// Number of statements in the up batch.
    pub statements: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Total bytes of generated content.
    pub total_bytes: usize,
}

impl GenerationSummary {
    /// Build a summary from a migration set.
    pub fn from_set(set: &MigrationSet) -> Self {
        let up = set.file(BatchKind::Up);
        Self {
            dialect: set.dialect.display_name().to_string(),
            tables: up.map_or(0, |f| {
                f.content
                    .lines()
                    .filter(|l| l.starts_with("CREATE TABLE "))
                    .count()
            }),
            total_files: set.file_count(),
            statements: up.map_or(0, |f| f.statement_count()),
            warning_count: set.warnings.len(),
            total_bytes: set.files.iter().map(|f| f.content.len()).sum(),
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Migration Generation Complete            ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Dialect:     {:<35}║\n", self.dialect));
        out.push_str(&format!("║  Tables:      {:<35}║\n", self.tables));
        out.push_str(&format!("║  Statements:  {:<35}║\n", self.statements));
        out.push_str(&format!("║  Files:       {:<35}║\n", self.total_files));
        out.push_str(&format!("║  Warnings:    {:<35}║\n", self.warning_count));

        let size_str = if self.total_bytes < 1024 {
            format!("{} B", self.total_bytes)
        } else {
            format!("{:.1} KB", self.total_bytes as f64 / 1024.0)
        };
        out.push_str(&format!("║  Total Size:  {:<35}║\n", size_str));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`MigrationSet`].
pub fn summarize(set: &MigrationSet) -> GenerationSummary {
    GenerationSummary::from_set(set)
}

// ============================================================================
// Tests
// ============================================================================

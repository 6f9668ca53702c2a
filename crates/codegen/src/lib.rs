//! # ddlforge Codegen
//!
//! Dialect resolution, dependency ordering and SQL emission for ddlforge.
//!
//! This crate takes a validated [`Catalog`](ddlforge_ir::Catalog) and
//! produces a [`MigrationSet`]: named SQL batches plus warnings for the one
//! active dialect.
//!
//! ## Features
//!
//! - **Dialect Resolution**: per-dialect overrides merged onto base settings,
//!   dialect-restricted columns and indexes dropped
//! - **Dependency Ordering**: referenced tables are created first
//! - **Migration Generation**: `CREATE TABLE`, constraints and indexes, plus
//!   an undo batch that drops everything in reverse order
//!

// ============================================================================
// Modules
// ============================================================================

pub mod context;
pub mod dialect;
pub mod generator;
pub mod migrations;
pub mod order;
pub mod resolve;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::GenerationContext;
pub use dialect::{DialectProfile, MethodSyntax};
pub use generator::{GenerationSummary, Generator, generate, summarize};
pub use order::DependencyGraph;
pub use resolve::{ResolvedCatalog, ResolvedColumn, ResolvedForeignKey, ResolvedIndex, ResolvedTable};

use ddlforge_core::{DdlError, DdlResult, Dialect};
use std::path::{Path, PathBuf};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the migration generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Active dialect
    pub dialect: Dialect,

    /// Filename prefix; `None` means a UTC timestamp taken at generation time
    pub filename_prefix: Option<String>,

    /// Base name of the batch files
    pub schema_name: String,

    /// Whether to emit the undo batch
    pub include_undo: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            filename_prefix: None,
            schema_name: "schema".to_string(),
            include_undo: true,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration for a dialect with default values
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Create a configuration from a dialect selector string.
    ///
    /// Fails with [`DdlError::UnsupportedDialect`] before any catalog work.
    pub fn for_dialect(selector: &str) -> DdlResult<Self> {
        Ok(Self::new(Dialect::parse(selector)?))
    }

    /// Use a fixed filename prefix instead of a timestamp
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = Some(prefix.into());
        self
    }

    /// Set the batch base name
    pub fn with_schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = name.into();
        self
    }

    /// Skip the undo batch
    pub fn without_undo(mut self) -> Self {
        self.include_undo = false;
        self
    }

    /// Check values that the builder cannot enforce
    pub fn validate(&self) -> DdlResult<()> {
        let bad = |s: &str| s.is_empty() || s.contains(['/', '\\']);
        if bad(&self.schema_name) {
            return Err(DdlError::InvalidConfig(format!(
                "schema name '{}' is not a valid file name",
                self.schema_name
            )));
        }
        if let Some(prefix) = &self.filename_prefix {
            if prefix.contains(['/', '\\']) {
                return Err(DdlError::InvalidConfig(format!(
                    "filename prefix '{}' must not contain path separators",
                    prefix
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Which batch a generated file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchKind {
    /// Creates the schema
    Up,
    /// Drops what the up batch created
    Undo,
}

impl BatchKind {
    /// File name suffix for this batch
    pub fn suffix(&self) -> &'static str {
        match self {
            BatchKind::Up => ".sql",
            BatchKind::Undo => ".undo.sql",
        }
    }
}

/// A single named SQL batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name (no directory)
    pub name: String,

    pub kind: BatchKind,

    /// SQL text
    pub content: String,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(name: impl Into<String>, kind: BatchKind, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            content: content.into(),
        }
    }

    /// Number of SQL statements in the file
    pub fn statement_count(&self) -> usize {
        self.content
            .lines()
            .filter(|line| !line.starts_with("--") && line.trim_end().ends_with(';'))
            .count()
    }
}

// ============================================================================
// MigrationSet
// ============================================================================

/// Everything one generation run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSet {
    /// Dialect the batches were rendered for
    pub dialect: Dialect,

    /// Batches in apply order (up first)
    pub files: Vec<GeneratedFile>,

    /// Human-readable warnings
    pub warnings: Vec<String>,
}

impl MigrationSet {
    /// Create an empty set for a dialect
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a file
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// The first file of a batch kind
    pub fn file(&self, kind: BatchKind) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.kind == kind)
    }

    /// Write all files into `dir`, returning the written paths
    pub fn write_to_disk(&self, dir: impl AsRef<Path>) -> DdlResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| DdlError::DirectoryCreate {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = dir.join(&file.name);
            std::fs::write(&path, &file.content).map_err(|e| DdlError::FileWrite {
                path: path.clone(),
                message: e.to_string(),
            })?;
            written.push(path);
        }
        Ok(written)
    }
}

// ============================================================================
// Tests
// ============================================================================

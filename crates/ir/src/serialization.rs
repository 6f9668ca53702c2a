//! Loading and saving table descriptor files
//!
//! Descriptor files are JSON. The preferred shape is a versioned wrapper:
//!
//! ```json
//! { "schema_version": 1, "tables": [ { "name": "LANGUAGE", "fields": [...] } ] }
//! ```
//!
//! A bare array of tables is accepted as well, for hand-written fixtures.

use crate::SCHEMA_VERSION;
use crate::descriptor::TableDescriptor;
use ddlforge_core::{DdlError, DdlResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File extension for descriptor files
pub const DESCRIPTOR_EXTENSION: &str = "json";

// ============================================================================
// Descriptor File Wrapper
// ============================================================================

/// Wrapper for descriptor files that includes version information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Schema version of the file format
    pub schema_version: u32,

    /// Tables in declaration order
    pub tables: Vec<TableDescriptor>,
}

impl CatalogFile {
    /// Wrap descriptors with the current schema version
    pub fn new(tables: Vec<TableDescriptor>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            tables,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorDocument {
    Versioned(CatalogFile),
    Bare(Vec<TableDescriptor>),
}

// ============================================================================
// Load Functions
// ============================================================================

/// Parse descriptors from a JSON string
pub fn descriptors_from_str(json: &str) -> DdlResult<Vec<TableDescriptor>> {
    match serde_json::from_str::<DescriptorDocument>(json)? {
        DescriptorDocument::Versioned(file) => {
            if file.schema_version > SCHEMA_VERSION {
                return Err(DdlError::InvalidConfig(format!(
                    "descriptor schema version {} is newer than supported version {}",
                    file.schema_version, SCHEMA_VERSION
                )));
            }
            Ok(file.tables)
        }
        DescriptorDocument::Bare(tables) => Ok(tables),
    }
}

/// Load descriptors from a file
pub fn load_descriptors(path: impl AsRef<Path>) -> DdlResult<Vec<TableDescriptor>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| DdlError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    descriptors_from_str(&json).map_err(|e| match e {
        DdlError::Json(je) => DdlError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid descriptor file: {}", je),
        },
        other => other,
    })
}

// ============================================================================
// Save Functions
// ============================================================================

/// Serialize descriptors to a pretty JSON string in the versioned shape
pub fn descriptors_to_string(tables: &[TableDescriptor]) -> DdlResult<String> {
    let file = CatalogFile::new(tables.to_vec());
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Save descriptors to a file, creating parent directories as needed
pub fn save_descriptors(tables: &[TableDescriptor], path: impl AsRef<Path>) -> DdlResult<()> {
    let path = path.as_ref();
    let json = descriptors_to_string(tables)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| DdlError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| DdlError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================

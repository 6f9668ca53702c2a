//! Table descriptors consumed by the interpreter
//!
//! A descriptor is what a front end hands over after discovering a table
//! definition: a table name, an optional table-level attribute string, and
//! the fields in declaration order, each with a semantic kind and a raw
//! attribute string. Nothing here is interpreted yet.

use ddlforge_core::FieldKind;
use serde::{Deserialize, Serialize};

// ============================================================================
// TableDescriptor
// ============================================================================

/// Raw description of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table name as declared
    pub name: String,

    /// Table-level attributes (composite keys, table indexes, composite foreign keys)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attributes: String,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl TableDescriptor {
    /// Create a descriptor with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: String::new(),
            fields: Vec::new(),
        }
    }

    /// Set the table-level attribute string
    pub fn with_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    /// Append a field
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        attributes: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind, attributes));
        self
    }
}

// ============================================================================
// FieldDescriptor
// ============================================================================

/// Raw description of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field (column) name as declared
    pub name: String,

    /// Semantic kind reported by the front end
    pub kind: FieldKind,

    /// Space-separated attribute tokens
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attributes: String,
}

impl FieldDescriptor {
    /// Create a field descriptor
    pub fn new(name: impl Into<String>, kind: FieldKind, attributes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            attributes: attributes.into(),
        }
    }
}

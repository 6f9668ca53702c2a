//! # ddlforge Core
//!
//! Core types and error handling for ddlforge.
//!
//! This crate provides the vocabulary shared by every stage of a generation
//! run:
//!
//! - **Types**: the [`Dialect`] selector, semantic [`FieldKind`]s and
//!   foreign key [`ReferentialAction`]s
//! - **Errors**: unified error handling with [`DdlError`] and [`DdlResult`]
//!

pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{DdlError, DdlResult};
pub use types::{Dialect, FieldKind, ReferentialAction};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

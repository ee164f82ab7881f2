//! mockcomm-common — Shared types, reference data and errors used across all mockcomm crates.

pub mod error;
pub mod taxa;
pub mod reference;

// Re-export commonly used types
pub use error::{MockCommError, Result};
pub use taxa::{Level, PhylumRecord, TableKind, TaxonRecord};

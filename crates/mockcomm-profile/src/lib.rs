//! mockcomm-profile — Loading and aligning expected vs. measured community profiles.
//!
//! Pipeline stages, in order:
//! 1. [`loader`] reads the two CSV tables
//! 2. [`columns`] finds the taxon-name and abundance columns in each
//! 3. [`align`] joins both tables on the canonical species name ([`normalise`])
//! 4. [`aggregate`] sums the unified species table per phylum

pub mod loader;
pub mod normalise;
pub mod columns;
pub mod align;
pub mod aggregate;

pub use aggregate::aggregate_by_phylum;
pub use align::{align_species, ColumnOverrides};
pub use columns::{ColumnOverride, ColumnPair};
pub use loader::{load_expected, load_measured, Table};
pub use normalise::normalise_species_name;

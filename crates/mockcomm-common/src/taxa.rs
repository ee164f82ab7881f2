//! Record types for the species/phylum comparison tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two input tables a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Certified reference composition.
    Expected,
    /// Classification pipeline output.
    Measured,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => f.write_str("expected"),
            Self::Measured => f.write_str("measured"),
        }
    }
}

/// Taxonomic level a comparison is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Species,
    Phylum,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Species => "Species",
            Self::Phylum => "Phylum",
        }
    }

    /// Column width used for names in the console summary.
    pub fn name_width(&self) -> usize {
        match self {
            Self::Species => 25,
            Self::Phylum => 15,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the unified species table.
///
/// `name` is always the canonical species name; percentages are relative
/// abundances and are not range-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonRecord {
    pub name: String,
    pub phylum: String,
    pub expected_pct: f64,
    pub measured_pct: f64,
}

impl TaxonRecord {
    /// measured − expected, in percentage points.
    pub fn difference(&self) -> f64 {
        self.measured_pct - self.expected_pct
    }
}

/// Species records summed per phylum.
#[derive(Debug, Clone, PartialEq)]
pub struct PhylumRecord {
    pub phylum: String,
    pub expected_pct: f64,
    pub measured_pct: f64,
}

impl PhylumRecord {
    pub fn difference(&self) -> f64 {
        self.measured_pct - self.expected_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difference_is_signed() {
        let rec = TaxonRecord {
            name: "Bacillus subtilis".to_string(),
            phylum: "Firmicutes".to_string(),
            expected_pct: 17.4,
            measured_pct: 12.4,
        };
        assert!((rec.difference() + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(Level::Species.to_string(), "Species");
        assert_eq!(Level::Phylum.as_str(), "Phylum");
        assert!(Level::Species.name_width() > Level::Phylum.name_width());
    }

    #[test]
    fn test_table_kind_serialises_lowercase() {
        let json = serde_json::to_string(&TableKind::Measured).unwrap();
        assert_eq!(json, "\"measured\"");
    }
}

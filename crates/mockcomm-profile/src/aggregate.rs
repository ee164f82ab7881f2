//! Phylum-level aggregation.

use std::collections::BTreeMap;

use mockcomm_common::{PhylumRecord, TaxonRecord};

/// Sum expected and measured abundances per phylum, sorted by phylum name.
pub fn aggregate_by_phylum(species: &[TaxonRecord]) -> Vec<PhylumRecord> {
    let mut sums: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for rec in species {
        let entry = sums.entry(rec.phylum.as_str()).or_default();
        entry.0 += rec.expected_pct;
        entry.1 += rec.measured_pct;
    }

    sums.into_iter()
        .map(|(phylum, (expected_pct, measured_pct))| PhylumRecord {
            phylum: phylum.to_string(),
            expected_pct,
            measured_pct,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, phylum: &str, expected: f64, measured: f64) -> TaxonRecord {
        TaxonRecord {
            name: name.to_string(),
            phylum: phylum.to_string(),
            expected_pct: expected,
            measured_pct: measured,
        }
    }

    #[test]
    fn test_sums_per_phylum() {
        let species = vec![
            rec("Escherichia coli", "Proteobacteria", 10.1, 8.5),
            rec("Bacillus subtilis", "Firmicutes", 17.4, 20.0),
            rec("Salmonella enterica", "Proteobacteria", 10.4, 12.0),
            rec("Staphylococcus aureus", "Firmicutes", 15.2, 14.0),
        ];
        let phyla = aggregate_by_phylum(&species);

        assert_eq!(phyla.len(), 2);
        assert_eq!(phyla[0].phylum, "Firmicutes");
        assert!((phyla[0].expected_pct - 32.6).abs() < 1e-9);
        assert!((phyla[0].measured_pct - 34.0).abs() < 1e-9);
        assert_eq!(phyla[1].phylum, "Proteobacteria");
        assert!((phyla[1].expected_pct - 20.5).abs() < 1e-9);
        assert!((phyla[1].measured_pct - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_is_its_own_bucket() {
        let species = vec![
            rec("Bacillus cereus", "Unknown", 0.0, 3.0),
            rec("Homo sapiens", "Unknown", 0.0, 1.5),
        ];
        let phyla = aggregate_by_phylum(&species);
        assert_eq!(phyla.len(), 1);
        assert_eq!(phyla[0].phylum, "Unknown");
        assert!((phyla[0].measured_pct - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_totals_are_preserved() {
        let species = vec![
            rec("Saccharomyces cerevisiae", "Ascomycota", 2.0, 1.2),
            rec("Cryptococcus neoformans", "Basidiomycota", 2.0, 0.4),
            rec("Listeria monocytogenes", "Firmicutes", 14.1, 13.0),
            rec("Enterococcus faecalis", "Firmicutes", 9.9, 11.1),
        ];
        let phyla = aggregate_by_phylum(&species);
        let species_total: f64 = species.iter().map(|r| r.expected_pct).sum();
        let phylum_total: f64 = phyla.iter().map(|p| p.expected_pct).sum();
        assert!((species_total - phylum_total).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_phylum(&[]).is_empty());
    }
}

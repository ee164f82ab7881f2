//! Species-level alignment of the expected and measured tables.
//!
//! Both tables are reduced to `canonical name → abundance` and joined on the
//! union of names. A species missing from one side gets 0 for that side.

use std::collections::BTreeMap;

use mockcomm_common::reference::phylum_of;
use mockcomm_common::{MockCommError, Result, TableKind, TaxonRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::columns::{detect_columns, ColumnOverride};
use crate::loader::Table;
use crate::normalise::normalise_species_name;

/// Explicit column names for both tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOverrides {
    #[serde(default)]
    pub expected: ColumnOverride,
    #[serde(default)]
    pub measured: ColumnOverride,
}

/// Extract `(canonical name, abundance)` pairs from one table.
///
/// Unparsable abundances abort for the expected table and are skipped for
/// the measured table. Rows with an empty name are ignored on both sides.
pub fn read_abundances(kind: TableKind, table: &Table, overrides: &ColumnOverride) -> Result<Vec<(String, f64)>> {
    let cols = detect_columns(kind, table, overrides)?;
    let mut out = Vec::with_capacity(table.rows().len());

    for row in 0..table.rows().len() {
        let name = normalise_species_name(table.cell(row, cols.taxon));
        if name.is_empty() {
            debug!("{} row {} has no taxon name, skipping", kind, row + 1);
            continue;
        }

        let raw = table.cell(row, cols.abundance);
        match raw.trim().parse::<f64>() {
            Ok(value) => out.push((name, value)),
            Err(_) if kind == TableKind::Measured => {
                debug!("Skipping measured row {} ({}): abundance {:?}", row + 1, name, raw);
            }
            Err(_) => {
                return Err(MockCommError::InvalidAbundance {
                    row: row + 1,
                    value: raw.to_string(),
                });
            }
        }
    }

    Ok(out)
}

/// Build the unified species table from both inputs.
///
/// Records come back sorted by canonical name. When a name occurs twice in
/// the same table the later row wins.
pub fn align_species(expected: &Table, measured: &Table, overrides: &ColumnOverrides) -> Result<Vec<TaxonRecord>> {
    let expected_rows = read_abundances(TableKind::Expected, expected, &overrides.expected)?;
    let measured_rows = read_abundances(TableKind::Measured, measured, &overrides.measured)?;

    let n_expected = expected_rows.len();
    let n_measured = measured_rows.len();

    // (expected, measured)
    let mut merged: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for (name, value) in expected_rows {
        merged.entry(name).or_default().0 = value;
    }
    for (name, value) in measured_rows {
        merged.entry(name).or_default().1 = value;
    }

    let records: Vec<TaxonRecord> = merged
        .into_iter()
        .map(|(name, (expected_pct, measured_pct))| TaxonRecord {
            phylum: phylum_of(&name).to_string(),
            name,
            expected_pct,
            measured_pct,
        })
        .collect();

    info!(
        "Aligned {} species ({} expected rows, {} measured rows)",
        records.len(),
        n_expected,
        n_measured
    );
    Ok(records)
}

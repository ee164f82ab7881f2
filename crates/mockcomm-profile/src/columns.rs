//! Heuristic detection of the taxon-name and abundance columns.
//!
//! Headers are matched case-insensitively by substring. The first matching
//! header wins, so a table with several candidate columns resolves to the
//! leftmost one. Explicit overrides from configuration bypass the heuristic.

use mockcomm_common::{MockCommError, Result, TableKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loader::Table;

/// Header fragments that mark the taxon-name column.
pub const TAXON_KEYWORDS: [&str; 3] = ["species", "organism", "name"];

/// Header fragments that mark the relative-abundance column.
pub const ABUNDANCE_KEYWORDS: [&str; 4] = ["abundance [%]", "abundance", "percent", "%"];

/// Resolved column indices for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    pub taxon: usize,
    pub abundance: usize,
}

/// Optional explicit header names for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOverride {
    pub taxon: Option<String>,
    pub abundance: Option<String>,
}

/// Index of the first header containing any of `keywords`, skipping `exclude`.
pub fn find_column(headers: &[String], keywords: &[&str], exclude: Option<usize>) -> Option<usize> {
    headers.iter().enumerate().find_map(|(i, header)| {
        if Some(i) == exclude {
            return None;
        }
        let lower = header.to_lowercase();
        keywords.iter().any(|kw| lower.contains(kw)).then_some(i)
    })
}

/// Index of the header equal to `name`, ignoring case and surrounding whitespace.
fn find_named(headers: &[String], name: &str) -> Option<usize> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
}

/// Resolve the taxon and abundance columns of `table`.
///
/// The abundance column is resolved first; the taxon column is then the
/// first matching header other than it, so one header never fills both roles.
pub fn detect_columns(kind: TableKind, table: &Table, overrides: &ColumnOverride) -> Result<ColumnPair> {
    let headers = table.headers();

    let abundance = match &overrides.abundance {
        Some(name) => Some(named_or_err(kind, headers, name)?),
        None => find_column(headers, &ABUNDANCE_KEYWORDS, None),
    };
    let taxon = match &overrides.taxon {
        Some(name) => Some(named_or_err(kind, headers, name)?),
        None => find_column(headers, &TAXON_KEYWORDS, abundance),
    };

    match (taxon, abundance) {
        (Some(taxon), Some(abundance)) => {
            debug!(
                "{} columns: taxon={:?}, abundance={:?}",
                kind, headers[taxon], headers[abundance]
            );
            Ok(ColumnPair { taxon, abundance })
        }
        _ => Err(MockCommError::MissingColumns {
            kind,
            available: headers.to_vec(),
        }),
    }
}

fn named_or_err(kind: TableKind, headers: &[String], name: &str) -> Result<usize> {
    find_named(headers, name).ok_or_else(|| MockCommError::UnknownColumn {
        kind,
        column: name.to_string(),
    })
}

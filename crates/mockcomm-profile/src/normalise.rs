//! Species name normalisation.

use mockcomm_common::reference::canonical_alias;

/// Trim a taxon name and map known abbreviations to the canonical binomial.
///
/// Lookup is exact on the trimmed string; unknown names come back trimmed
/// but otherwise untouched.
pub fn normalise_species_name(name: &str) -> String {
    let trimmed = name.trim();
    canonical_alias(trimmed)
        .map(str::to_string)
        .unwrap_or_else(|| trimmed.to_string())
}

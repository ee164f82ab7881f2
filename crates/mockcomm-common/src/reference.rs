//! Static reference data for the ZymoBIOMICS D6322 mock community.
//!
//! Both tables are fixed constants; they are not read from configuration.

/// Phylum bucket for species missing from [`SPECIES_PHYLUM`].
pub const UNKNOWN_PHYLUM: &str = "Unknown";

/// Canonical species name → phylum.
pub const SPECIES_PHYLUM: [(&str, &str); 10] = [
    ("Pseudomonas aeruginosa",   "Proteobacteria"),
    ("Escherichia coli",         "Proteobacteria"),
    ("Salmonella enterica",      "Proteobacteria"),
    ("Lactobacillus fermentum",  "Firmicutes"),
    ("Enterococcus faecalis",    "Firmicutes"),
    ("Staphylococcus aureus",    "Firmicutes"),
    ("Listeria monocytogenes",   "Firmicutes"),
    ("Bacillus subtilis",        "Firmicutes"),
    ("Saccharomyces cerevisiae", "Ascomycota"),
    ("Cryptococcus neoformans",  "Basidiomycota"),
];

/// Abbreviated spelling → canonical species name.
pub const SPECIES_ALIASES: [(&str, &str); 10] = [
    ("E. coli",          "Escherichia coli"),
    ("P. aeruginosa",    "Pseudomonas aeruginosa"),
    ("S. enterica",      "Salmonella enterica"),
    ("L. fermentum",     "Lactobacillus fermentum"),
    ("E. faecalis",      "Enterococcus faecalis"),
    ("S. aureus",        "Staphylococcus aureus"),
    ("L. monocytogenes", "Listeria monocytogenes"),
    ("B. subtilis",      "Bacillus subtilis"),
    ("S. cerevisiae",    "Saccharomyces cerevisiae"),
    ("C. neoformans",    "Cryptococcus neoformans"),
];

/// Phylum for a canonical species name, or [`UNKNOWN_PHYLUM`].
pub fn phylum_of(species: &str) -> &'static str {
    SPECIES_PHYLUM
        .iter()
        .find(|(name, _)| *name == species)
        .map(|(_, phylum)| *phylum)
        .unwrap_or(UNKNOWN_PHYLUM)
}

/// Canonical name for an exact alias match.
pub fn canonical_alias(name: &str) -> Option<&'static str> {
    SPECIES_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
}

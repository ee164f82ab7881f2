//! Shared fixtures for mockcomm integration tests.
//!
//! Provides sample expected/measured CSV exports shaped like the real
//! ZymoBIOMICS D6322 files and a scratch directory to write them into.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub use pretty_assertions::assert_eq;

/// File name of the certified composition export.
pub const EXPECTED_FILE: &str = "ZymoD6322_expected_profile.csv";

/// File name of the classification-rates export.
pub const MEASURED_FILE: &str = "ZymoD6322_3296B_classification_rates.csv";

/// Theoretical genomic DNA composition, header on row one.
pub const EXPECTED_PROFILE_CSV: &str = "\
Species,Genomic DNA Abundance (%)
Pseudomonas aeruginosa,12.0
Escherichia coli,12.0
Salmonella enterica,12.0
Lactobacillus fermentum,12.0
Enterococcus faecalis,12.0
Staphylococcus aureus,12.0
Listeria monocytogenes,12.0
Bacillus subtilis,12.0
Saccharomyces cerevisiae,2.0
Cryptococcus neoformans,2.0
";

/// Classifier output: a title line, then the real header on row two.
///
/// Contains an abbreviated alias, an off-panel contaminant, a species the
/// classifier missed entirely (C. neoformans) and a row with no abundance.
pub const MEASURED_RATES_CSV: &str = "\
Classification rates - sample 3296B
Rank,Name,Taxonomy ID,Reads,Abundance [%]
species,P. aeruginosa,287,41250,11.0
species,Escherichia coli,562,36000,9.6
species,S. enterica,28901,45750,12.2
species,Lactobacillus fermentum,1613,30000,8.0
species,E. faecalis,1351,52500,14.0
species,Staphylococcus aureus,1280,48750,13.0
species,L. monocytogenes,1639,56250,15.0
species,Bacillus subtilis,1423,54000,14.4
species,S. cerevisiae,4932,3750,1.0
species,Bacillus cereus,1396,6000,1.6
species,unclassified,0,1200,N/A
";

/// Scratch directory that holds fixture files for one test.
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create fixture directory")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` inside the directory and return its path.
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write fixture {:?}", path))?;
        Ok(path)
    }

    /// Write both sample exports under their real file names.
    pub fn with_zymo_inputs(self) -> Result<Self> {
        self.write(EXPECTED_FILE, EXPECTED_PROFILE_CSV)?;
        self.write(MEASURED_FILE, MEASURED_RATES_CSV)?;
        Ok(self)
    }
}

/// Assert two floats agree to within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

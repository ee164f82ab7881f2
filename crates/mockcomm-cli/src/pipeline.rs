//! The comparison run: load → align → aggregate → chart → summary.

use std::path::Path;

use mockcomm_common::{Level, MockCommError, PhylumRecord, Result, TableKind, TaxonRecord};
use mockcomm_profile::{aggregate_by_phylum, align_species, load_expected, load_measured};
use mockcomm_report::{
    print_summary, render_comparison, render_phylum_table, render_species_table, show_chart, ChartOptions,
    StackEntry,
};
use tracing::info;

use crate::config::Config;

/// Unified tables produced by a completed run.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub species: Vec<TaxonRecord>,
    pub phyla: Vec<PhylumRecord>,
}

/// Fail before reading anything if either input is absent.
fn ensure_inputs_exist(config: &Config) -> Result<()> {
    for (kind, path) in [
        (TableKind::Expected, &config.inputs.expected),
        (TableKind::Measured, &config.inputs.measured),
    ] {
        let exists = path.try_exists().map_err(|e| MockCommError::Read {
            kind,
            path: path.clone(),
            source: e.into(),
        })?;
        if !exists {
            return Err(MockCommError::FileNotFound {
                kind,
                path: path.clone(),
            });
        }
    }
    Ok(())
}

/// Load and join both tables without producing any output files.
pub async fn compare(config: &Config) -> Result<Comparison> {
    ensure_inputs_exist(config)?;

    info!("Reading data files...");
    let expected = load_expected(&config.inputs.expected).await?;
    let measured = load_measured(&config.inputs.measured, config.inputs.measured_skip_rows).await?;

    info!("Processing species-level data...");
    let species = align_species(&expected, &measured, &config.columns)?;

    info!("Aggregating to phylum level...");
    let phyla = aggregate_by_phylum(&species);

    Ok(Comparison { species, phyla })
}

/// Full run: compare, print the tables, write both charts and print the summary.
pub async fn run(config: &Config) -> Result<Comparison> {
    let comparison = compare(config).await?;

    println!("\nSpecies-level data:");
    print!("{}", render_species_table(&comparison.species));
    println!("\nPhylum-level data:");
    print!("{}", render_phylum_table(&comparison.phyla));

    let opts = config.output.chart_options();

    info!("Creating species-level comparison plot...");
    let entries: Vec<StackEntry> = comparison.species.iter().map(StackEntry::from).collect();
    write_chart(Level::Species, &entries, &opts, &config.output.species_chart, config.output.show)?;

    info!("Creating phylum-level comparison plot...");
    let entries: Vec<StackEntry> = comparison.phyla.iter().map(StackEntry::from).collect();
    write_chart(Level::Phylum, &entries, &opts, &config.output.phylum_chart, config.output.show)?;

    print_summary(&comparison.species, &comparison.phyla)?;
    Ok(comparison)
}

fn write_chart(level: Level, entries: &[StackEntry], opts: &ChartOptions, path: &Path, show: bool) -> Result<()> {
    render_comparison(level, entries, opts, path)?;
    if show {
        show_chart(path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockcomm_test_utils::{FixtureDir, EXPECTED_FILE, EXPECTED_PROFILE_CSV, MEASURED_FILE, MEASURED_RATES_CSV};

    fn config_in(dir: &FixtureDir) -> Config {
        let mut config = Config::default();
        config.inputs.expected = dir.path().join(EXPECTED_FILE);
        config.inputs.measured = dir.path().join(MEASURED_FILE);
        config.output.species_chart = dir.path().join("species.png");
        config.output.phylum_chart = dir.path().join("phylum.png");
        config.output.show = false;
        config
    }

    fn assert_png(path: &Path) {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{} is not a PNG", path.display());
    }

    #[tokio::test]
    async fn test_missing_expected_file_halts_without_output() {
        let dir = FixtureDir::new().unwrap();
        dir.write(MEASURED_FILE, MEASURED_RATES_CSV).unwrap();
        let config = config_in(&dir);

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, MockCommError::FileNotFound { kind: TableKind::Expected, .. }));
        assert!(err.is_recoverable());
        assert!(!config.output.species_chart.exists());
        assert!(!config.output.phylum_chart.exists());
    }

    #[tokio::test]
    async fn test_missing_measured_file_is_checked_before_reading() {
        let dir = FixtureDir::new().unwrap();
        dir.write(EXPECTED_FILE, "not,a,valid\nprofile").unwrap();
        let config = config_in(&dir);

        let err = compare(&config).await.unwrap_err();
        assert!(matches!(err, MockCommError::FileNotFound { kind: TableKind::Measured, .. }));
    }

    #[tokio::test]
    async fn test_unusable_measured_columns_halt_before_charts() {
        let dir = FixtureDir::new().unwrap();
        dir.write(EXPECTED_FILE, EXPECTED_PROFILE_CSV).unwrap();
        dir.write(MEASURED_FILE, "title\nTaxon,Reads\nE. coli,100\n").unwrap();
        let config = config_in(&dir);

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, MockCommError::MissingColumns { kind: TableKind::Measured, .. }));
        assert!(err.is_recoverable());
        assert!(!config.output.species_chart.exists());
    }

    #[tokio::test]
    async fn test_compare_on_sample_exports() {
        let dir = FixtureDir::new().unwrap().with_zymo_inputs().unwrap();
        let config = config_in(&dir);

        let comparison = compare(&config).await.unwrap();
        assert_eq!(comparison.species.len(), 11);
        assert_eq!(comparison.phyla.len(), 5);
        assert!(!config.output.species_chart.exists());
    }

    #[tokio::test]
    async fn test_run_writes_both_charts() {
        let dir = FixtureDir::new().unwrap().with_zymo_inputs().unwrap();
        let mut config = config_in(&dir);
        config.output.width = 600;
        config.output.height = 320;

        let comparison = run(&config).await.unwrap();
        assert_eq!(comparison.species.len(), 11);
        assert_png(&config.output.species_chart);
        assert_png(&config.output.phylum_chart);
    }

    #[tokio::test]
    async fn test_unreadable_input_location_is_a_read_error() {
        let dir = FixtureDir::new().unwrap().with_zymo_inputs().unwrap();
        let mut config = config_in(&dir);
        // a regular file used as a directory
        config.inputs.measured = dir.path().join(EXPECTED_FILE).join("rates.csv");

        let err = compare(&config).await.unwrap_err();
        assert!(matches!(err, MockCommError::Read { kind: TableKind::Measured, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_column_overrides_reach_the_aligner() {
        let dir = FixtureDir::new().unwrap();
        dir.write(EXPECTED_FILE, EXPECTED_PROFILE_CSV).unwrap();
        dir.write(MEASURED_FILE, "title\nTaxon,Fraction\nE. coli,100\n").unwrap();
        let mut config = config_in(&dir);
        config.columns.measured.taxon = Some("Taxon".to_string());
        config.columns.measured.abundance = Some("Fraction".to_string());

        let comparison = compare(&config).await.unwrap();
        let coli = comparison
            .species
            .iter()
            .find(|r| r.name == "Escherichia coli")
            .unwrap();
        assert_eq!(coli.measured_pct, 100.0);
    }
}

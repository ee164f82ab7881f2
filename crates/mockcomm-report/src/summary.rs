//! Console reporting: aligned data tables and the final summary statistics.

use std::io::{self, Write};

use mockcomm_common::{Level, PhylumRecord, TaxonRecord};

const BANNER_WIDTH: usize = 50;

/// One summary line: name padded (or truncated) to `width`, then expected,
/// measured and signed difference to one decimal place.
pub fn format_line(name: &str, width: usize, expected: f64, measured: f64) -> String {
    let diff = measured - expected;
    format!(
        "{name:<width$.width$} Expected: {expected:5.1}%  Measured: {measured:5.1}%  Diff: {diff:+5.1}%"
    )
}

/// Tabular dump of the unified species table.
pub fn render_species_table(species: &[TaxonRecord]) -> String {
    let mut out = format!("{:<28}{:<16}{:>10}{:>10}\n", "Species", "Phylum", "Expected", "Measured");
    for rec in species {
        out.push_str(&format!(
            "{:<28}{:<16}{:>10.2}{:>10.2}\n",
            rec.name, rec.phylum, rec.expected_pct, rec.measured_pct
        ));
    }
    out
}

/// Tabular dump of the phylum aggregates.
pub fn render_phylum_table(phyla: &[PhylumRecord]) -> String {
    let mut out = format!("{:<16}{:>10}{:>10}\n", "Phylum", "Expected", "Measured");
    for rec in phyla {
        out.push_str(&format!(
            "{:<16}{:>10.2}{:>10.2}\n",
            rec.phylum, rec.expected_pct, rec.measured_pct
        ));
    }
    out
}

/// Write the summary statistics block for both levels.
pub fn write_summary<W: Write>(out: &mut W, species: &[TaxonRecord], phyla: &[PhylumRecord]) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "SUMMARY STATISTICS")?;
    writeln!(out, "{rule}")?;

    writeln!(out)?;
    writeln!(out, "Species-level comparison:")?;
    let width = Level::Species.name_width();
    for rec in species {
        writeln!(out, "{}", format_line(&rec.name, width, rec.expected_pct, rec.measured_pct))?;
    }

    writeln!(out)?;
    writeln!(out, "Phylum-level comparison:")?;
    let width = Level::Phylum.name_width();
    for rec in phyla {
        writeln!(out, "{}", format_line(&rec.phylum, width, rec.expected_pct, rec.measured_pct))?;
    }
    Ok(())
}

/// [`write_summary`] to standard output.
pub fn print_summary(species: &[TaxonRecord], phyla: &[PhylumRecord]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_summary(&mut handle, species, phyla)?;
    handle.flush()
}

//! mockcomm-report — Charts and console summaries for a composition comparison.

pub mod palette;
pub mod chart;
pub mod summary;

pub use chart::{render_comparison, show_chart, ChartOptions, StackEntry};
pub use summary::{print_summary, render_phylum_table, render_species_table};

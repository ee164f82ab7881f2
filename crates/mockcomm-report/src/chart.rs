//! Side-by-side stacked bar charts: expected vs. measured composition.
//!
//! Each chart has two panels holding a single stacked bar each, a shared
//! colour per taxon, and a legend strip on the right.

use std::path::Path;

use mockcomm_common::{Level, MockCommError, PhylumRecord, Result, TaxonRecord};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{info, warn};

use crate::palette::taxon_colors;

/// Canvas size at 300 dpi for a 15×8 inch figure.
pub const DEFAULT_WIDTH: u32 = 4500;
pub const DEFAULT_HEIGHT: u32 = 2400;

/// Segments at or below this percentage are drawn without a label.
pub const DEFAULT_LABEL_THRESHOLD_PCT: f64 = 2.0;

/// Upper end of the value axis; anything stacked above it is cut off.
pub const AXIS_MAX_PCT: f64 = 100.0;

const SEGMENT_OPACITY: f64 = 0.8;
const LEGEND_FRACTION: f64 = 0.18;
const Y_LABEL: &str = "Relative Abundance (%)";

/// Font sizes are given for an 800 px tall canvas and scaled from there.
const BASE_HEIGHT: f64 = 800.0;
const FONT_SIZE_TITLE: f64 = 22.0;
const FONT_SIZE_PANEL: f64 = 18.0;
const FONT_SIZE_AXIS: f64 = 14.0;
const FONT_SIZE_LABEL: f64 = 13.0;

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub label_threshold_pct: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            label_threshold_pct: DEFAULT_LABEL_THRESHOLD_PCT,
        }
    }
}

impl ChartOptions {
    fn font(&self, base: f64) -> u32 {
        ((base * self.height as f64 / BASE_HEIGHT).round() as u32).max(1)
    }
}

/// One taxon's share in both bars.
#[derive(Debug, Clone, PartialEq)]
pub struct StackEntry {
    pub label: String,
    pub expected: f64,
    pub measured: f64,
}

impl From<&TaxonRecord> for StackEntry {
    fn from(rec: &TaxonRecord) -> Self {
        Self {
            label: rec.name.clone(),
            expected: rec.expected_pct,
            measured: rec.measured_pct,
        }
    }
}

impl From<&PhylumRecord> for StackEntry {
    fn from(rec: &PhylumRecord) -> Self {
        Self {
            label: rec.phylum.clone(),
            expected: rec.expected_pct,
            measured: rec.measured_pct,
        }
    }
}

/// A drawn piece of one stacked bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Index into the entry list (and colour list).
    pub index: usize,
    pub bottom: f64,
    pub top: f64,
}

impl Segment {
    pub fn value(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> f64 {
        (self.bottom + self.top) / 2.0
    }

    /// The part of the segment below `max`, or `None` if it starts at or above it.
    pub fn clip(&self, max: f64) -> Option<Segment> {
        (self.bottom < max).then(|| Segment {
            top: self.top.min(max),
            ..*self
        })
    }
}

/// Stack `values` bottom-up in input order.
pub fn stack_segments(values: &[f64]) -> Vec<Segment> {
    let mut bottom = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(index, &v)| {
            let seg = Segment { index, bottom, top: bottom + v };
            bottom += v;
            seg
        })
        .collect()
}

/// Text for a segment's label, or `None` when it is too thin to annotate.
pub fn segment_label(value: f64, threshold_pct: f64) -> Option<String> {
    (value > threshold_pct).then(|| format!("{value:.1}%"))
}

fn render_err<E: std::fmt::Display>(e: E) -> MockCommError {
    MockCommError::Render(e.to_string())
}

/// Render the expected/measured comparison for one level to a PNG at `output`.
pub fn render_comparison(level: Level, entries: &[StackEntry], opts: &ChartOptions, output: &Path) -> Result<()> {
    let colors = taxon_colors(entries.len());

    let root = BitMapBackend::new(output, (opts.width, opts.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let title_style = ("sans-serif", opts.font(FONT_SIZE_TITLE)).into_font();
    let root = root
        .titled(&format!("ZymoResearch Mock Community - {level} Level Comparison"), title_style)
        .map_err(render_err)?;

    let plot_width = (opts.width as f64 * (1.0 - LEGEND_FRACTION)) as u32;
    let (plot_area, legend_area) = root.split_horizontally(plot_width);
    let panels = plot_area.split_evenly((1, 2));

    let expected: Vec<f64> = entries.iter().map(|e| e.expected).collect();
    let measured: Vec<f64> = entries.iter().map(|e| e.measured).collect();

    draw_panel(&panels[0], &format!("Expected {level} Composition"), "Expected", &expected, &colors, opts)?;
    draw_panel(&panels[1], &format!("Measured {level} Composition"), "Measured", &measured, &colors, opts)?;
    draw_legend(&legend_area, level, entries, &colors, opts)?;

    root.present().map_err(render_err)?;
    info!("Saved {} level plot to: {}", level, output.display());
    Ok(())
}

/// Open a written chart in the system image viewer.
///
/// A missing viewer only costs the preview, so failures are logged and the
/// run carries on.
pub fn show_chart(path: &Path) {
    match open::that(path) {
        Ok(()) => info!("Opened {} in the system viewer", path.display()),
        Err(e) => warn!("Could not display {}: {}", path.display(), e),
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    bar_label: &str,
    values: &[f64],
    colors: &[RGBColor],
    opts: &ChartOptions,
) -> Result<()> {
    let title_style = ("sans-serif", opts.font(FONT_SIZE_PANEL)).into_font();
    let axis_size = opts.font(FONT_SIZE_AXIS);

    let mut chart = ChartBuilder::on(area)
        .caption(title, title_style)
        .margin(opts.font(10.0))
        .x_label_area_size(axis_size * 3)
        .y_label_area_size(axis_size * 5)
        .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..AXIS_MAX_PCT)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .x_desc(bar_label)
        .y_desc(Y_LABEL)
        .axis_desc_style(("sans-serif", axis_size))
        .label_style(("sans-serif", axis_size))
        .draw()
        .map_err(render_err)?;

    let segments = stack_segments(values);

    chart
        .draw_series(segments.iter().filter_map(|seg| seg.clip(AXIS_MAX_PCT)).map(|seg| {
            Rectangle::new(
                [(0.2, seg.bottom), (0.8, seg.top)],
                colors[seg.index].mix(SEGMENT_OPACITY).filled(),
            )
        }))
        .map_err(render_err)?;

    let label_style = ("sans-serif", opts.font(FONT_SIZE_LABEL))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    chart
        .draw_series(visible_labels(&segments, opts.label_threshold_pct).into_iter().map(
            |(text, y)| Text::new(text, (0.5, y), label_style.clone()),
        ))
        .map_err(render_err)?;

    Ok(())
}

/// Labels to draw on a stack, with their vertical position. Labels are
/// placed at the unclipped centre, so one whose centre lies above the axis
/// is dropped.
fn visible_labels(segments: &[Segment], threshold_pct: f64) -> Vec<(String, f64)> {
    segments
        .iter()
        .filter(|seg| seg.center() <= AXIS_MAX_PCT)
        .filter_map(|seg| segment_label(seg.value(), threshold_pct).map(|text| (text, seg.center())))
        .collect()
}

fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    level: Level,
    entries: &[StackEntry],
    colors: &[RGBColor],
    opts: &ChartOptions,
) -> Result<()> {
    let size = opts.font(FONT_SIZE_LABEL) as i32;
    let line_height = size * 2;
    let x = size;
    let mut y = opts.height as i32 / 4;

    let heading = ("sans-serif", size as u32).into_font();
    area.draw(&Text::new(level.to_string(), (x, y), heading))
        .map_err(render_err)?;
    y += line_height;

    let text_style = ("sans-serif", size as u32).into_font().color(&BLACK);
    for (entry, color) in entries.iter().zip(colors) {
        area.draw(&Rectangle::new(
            [(x, y), (x + size, y + size)],
            color.mix(SEGMENT_OPACITY).filled(),
        ))
        .map_err(render_err)?;
        area.draw(&Text::new(entry.label.clone(), (x + size * 2, y), text_style.clone()))
            .map_err(render_err)?;
        y += line_height;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_segments_accumulate() {
        let segs = stack_segments(&[10.0, 2.5, 0.0, 30.0]);
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0].bottom, 0.0);
        assert_eq!(segs[1].bottom, 10.0);
        assert_eq!(segs[2].value(), 0.0);
        assert_eq!(segs[3].top, 42.5);
        assert_eq!(segs[3].center(), 27.5);
    }

    #[test]
    fn test_label_threshold_is_exclusive() {
        assert_eq!(segment_label(2.0, 2.0), None);
        assert_eq!(segment_label(2.05, 2.0).as_deref(), Some("2.0%"));
        assert_eq!(segment_label(17.44, 2.0).as_deref(), Some("17.4%"));
        assert_eq!(segment_label(0.0, 2.0), None);
    }

    #[test]
    fn test_entries_from_records() {
        let taxon = TaxonRecord {
            name: "Escherichia coli".to_string(),
            phylum: "Proteobacteria".to_string(),
            expected_pct: 10.0,
            measured_pct: 8.5,
        };
        let entry = StackEntry::from(&taxon);
        assert_eq!(entry.label, "Escherichia coli");
        assert_eq!((entry.expected, entry.measured), (10.0, 8.5));

        let phylum = PhylumRecord {
            phylum: "Firmicutes".to_string(),
            expected_pct: 60.0,
            measured_pct: 64.4,
        };
        let entry = StackEntry::from(&phylum);
        assert_eq!(entry.label, "Firmicutes");
        assert_eq!((entry.expected, entry.measured), (60.0, 64.4));
    }

    #[test]
    fn test_font_scales_with_height() {
        let opts = ChartOptions::default();
        assert_eq!(opts.font(FONT_SIZE_TITLE), 66);
        let small = ChartOptions { width: 1500, height: 800, ..ChartOptions::default() };
        assert_eq!(small.font(FONT_SIZE_TITLE), 22);
    }

    #[test]
    fn test_clip_cuts_segments_at_axis_top() {
        let segs = stack_segments(&[60.0, 30.0, 25.0, 10.0]);
        let clipped: Vec<Segment> = segs.iter().filter_map(|s| s.clip(AXIS_MAX_PCT)).collect();
        assert_eq!(clipped.len(), 3);
        assert_eq!(clipped[1], segs[1]);
        assert_eq!(clipped[2].bottom, 90.0);
        assert_eq!(clipped[2].top, 100.0);
        assert!(clipped.iter().all(|s| s.top <= AXIS_MAX_PCT));
    }

    #[test]
    fn test_labels_above_axis_are_dropped() {
        // centres at 30, 75, 102.5, 120
        let segs = stack_segments(&[60.0, 30.0, 25.0, 10.0]);
        let labels = visible_labels(&segs, DEFAULT_LABEL_THRESHOLD_PCT);
        assert_eq!(
            labels,
            vec![("60.0%".to_string(), 30.0), ("30.0%".to_string(), 75.0)]
        );
    }

    #[test]
    fn test_labels_respect_threshold() {
        let segs = stack_segments(&[50.0, 1.5, 48.5]);
        let labels: Vec<String> = visible_labels(&segs, 2.0).into_iter().map(|(t, _)| t).collect();
        assert_eq!(labels, ["50.0%", "48.5%"]);
    }

    #[test]
    fn test_render_clips_overfull_stack() {
        let dir = mockcomm_test_utils::FixtureDir::new().unwrap();
        let output = dir.path().join("overfull.png");
        let entries = vec![
            StackEntry { label: "Firmicutes".into(), expected: 60.0, measured: 90.0 },
            StackEntry { label: "Proteobacteria".into(), expected: 40.0, measured: 35.0 },
        ];
        let opts = ChartOptions { width: 600, height: 320, ..ChartOptions::default() };
        render_comparison(Level::Phylum, &entries, &opts, &output).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_render_writes_png() {
        let dir = mockcomm_test_utils::FixtureDir::new().unwrap();
        let output = dir.path().join("species.png");
        let entries = vec![
            StackEntry { label: "Escherichia coli".into(), expected: 50.0, measured: 40.0 },
            StackEntry { label: "Bacillus subtilis".into(), expected: 50.0, measured: 60.0 },
        ];
        let opts = ChartOptions { width: 900, height: 480, ..ChartOptions::default() };
        render_comparison(Level::Species, &entries, &opts, &output).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}

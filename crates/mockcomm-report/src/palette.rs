//! Qualitative colour palette for taxa.

use plotters::style::RGBColor;

/// ColorBrewer "Set3", 12 classes.
pub const SET3: [RGBColor; 12] = [
    RGBColor(141, 211, 199),
    RGBColor(255, 255, 179),
    RGBColor(190, 186, 218),
    RGBColor(251, 128, 114),
    RGBColor(128, 177, 211),
    RGBColor(253, 180, 98),
    RGBColor(179, 222, 105),
    RGBColor(252, 205, 229),
    RGBColor(217, 217, 217),
    RGBColor(188, 128, 189),
    RGBColor(204, 235, 197),
    RGBColor(255, 237, 111),
];

/// `n` colours sampled evenly across [`SET3`], first and last class included.
///
/// Colours are distinct for `n <= 12`; larger counts repeat classes.
pub fn taxon_colors(n: usize) -> Vec<RGBColor> {
    let classes = SET3.len();
    (0..n)
        .map(|i| {
            let x = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            let idx = ((x * classes as f64) as usize).min(classes - 1);
            SET3[idx]
        })
        .collect()
}

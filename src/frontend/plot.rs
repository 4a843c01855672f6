//! Marker layout and painting for the signal pane
//!
//! Layout is a pure function of a window snapshot and a target rectangle:
//! samples are placed left to right at a fixed horizontal step derived from
//! the window capacity, and the raw amplitude maps linearly onto the
//! vertical extent with 0 at the top edge and full scale at the bottom
//! (screen space is y-down). Painting draws each sample as an independent
//! fixed-radius filled circle; there is no interpolation between points.

use crate::types::{Sample, RAW_SAMPLE_MAX, RAW_SAMPLE_MIN};
use egui::{pos2, Color32, Painter, Pos2, Rect, Stroke};

/// Margin between the widget bounds and the drawable region
pub const REGION_INSET: f32 = 3.6;

/// Radius of a sample marker
pub const MARKER_RADIUS: f32 = 3.0;

/// Fill color of the sample markers
pub const MARKER_COLOR: Color32 = Color32::from_rgb(255, 0, 0);

/// Background of the signal pane
pub const PANE_BACKGROUND: Color32 = Color32::from_rgb(35, 35, 37);

/// Grid line color
const GRID_COLOR: Color32 = Color32::from_gray(70);

/// Map `x` from one range onto another
///
/// The output range may be inverted or degenerate; no clamping is applied.
pub fn linear_map(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Lay out one marker position per sample inside `region`
///
/// The i-th sample sits at `region.left() + i * region.width() / capacity`;
/// its raw value maps onto `[region.top(), region.bottom()]`. Deterministic:
/// the same snapshot and region always produce the same positions.
pub fn layout_markers(samples: &[Sample], capacity: usize, region: Rect) -> Vec<Pos2> {
    if capacity == 0 {
        return Vec::new();
    }
    let dx = region.width() / capacity as f32;
    samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            pos2(
                region.left() + i as f32 * dx,
                linear_map(
                    sample,
                    RAW_SAMPLE_MIN,
                    RAW_SAMPLE_MAX,
                    region.top(),
                    region.bottom(),
                ),
            )
        })
        .collect()
}

/// Paint the signal pane: background, grid, then one marker per sample
pub fn draw_signal(
    painter: &Painter,
    bounds: Rect,
    samples: &[Sample],
    capacity: usize,
    grid_divisions: u32,
) {
    painter.rect_filled(bounds, 0.0, PANE_BACKGROUND);
    draw_grid(painter, bounds, grid_divisions);

    let region = bounds.shrink(REGION_INSET);
    for pos in layout_markers(samples, capacity, region) {
        painter.circle_filled(pos, MARKER_RADIUS, MARKER_COLOR);
    }
}

fn draw_grid(painter: &Painter, bounds: Rect, divisions: u32) {
    if divisions == 0 {
        return;
    }
    let stroke = Stroke::new(0.5, GRID_COLOR);
    for i in 0..=divisions {
        let t = i as f32 / divisions as f32;
        let x = bounds.left() + t * bounds.width();
        let y = bounds.top() + t * bounds.height();
        painter.line_segment([pos2(x, bounds.top()), pos2(x, bounds.bottom())], stroke);
        painter.line_segment([pos2(bounds.left(), y), pos2(bounds.right(), y)], stroke);
    }
}

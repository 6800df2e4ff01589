//! Deterministic positions for every primitive.
//!
//! All functions are pure in (layer, index, layer size) so an edge created
//! before a push lands on exactly the same endpoints as one created after it.

use super::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Input,
    Hidden,
    Output,
}

/// Side length of the square grid holding `size` input cells (5 for 25 cells).
#[inline]
pub fn grid_side(size: usize) -> usize {
    let mut side = (size as f64).sqrt() as usize;
    while side * side < size {
        side += 1;
    }
    side.max(1)
}

pub fn node_position(layer: Layer, index: usize, size: usize) -> Vec3 {
    match layer {
        Layer::Input => {
            let side = grid_side(size);
            let center = (side as f32 - 1.0) / 2.0;
            let row = (index / side) as f32;
            let col = (index % side) as f32;
            Vec3::new(
                INPUT_LAYER_X,
                (center - row) * INPUT_GRID_SPACING,
                (col - center) * INPUT_GRID_SPACING,
            )
        }
        Layer::Hidden => column_position(HIDDEN_LAYER_X, HIDDEN_SPACING, index, size),
        Layer::Output => column_position(OUTPUT_LAYER_X, OUTPUT_SPACING, index, size),
    }
}

#[inline]
fn column_position(x: f32, spacing: f32, index: usize, size: usize) -> Vec3 {
    let center = (size as f32 - 1.0) / 2.0;
    Vec3::new(x, (center - index as f32) * spacing, 0.0)
}

/// Endpoints of one seven-segment stroke, segments ordered `a..g`:
/// top, upper right, lower right, bottom, lower left, upper left, middle.
pub fn segment_endpoints(digit: usize, segment: usize, output_size: usize) -> (Vec3, Vec3) {
    let anchor = node_position(Layer::Output, digit, output_size) + Vec3::X * GLYPH_OFFSET_X;
    let (w, h) = (GLYPH_HALF_WIDTH, GLYPH_HALF_HEIGHT);
    let (a, b) = match segment {
        0 => ((-w, h), (w, h)),
        1 => ((w, h), (w, 0.0)),
        2 => ((w, 0.0), (w, -h)),
        3 => ((-w, -h), (w, -h)),
        4 => ((-w, 0.0), (-w, -h)),
        5 => ((-w, h), (-w, 0.0)),
        _ => ((-w, 0.0), (w, 0.0)),
    };
    (
        anchor + Vec3::new(a.0, a.1, 0.0),
        anchor + Vec3::new(b.0, b.1, 0.0),
    )
}

//! Maps activations and weights onto primitive attributes.
//!
//! Everything here is a pure mapping except [`encode_scene`], which writes the
//! results into primitives already present in the arena. Nothing is created or
//! destroyed.

use super::config::{InteractionPolicy, OutputEncoding, TwinOptions};
use super::constants::*;
use super::forward::Activations;
use super::layout::Layer;
use super::scene::SceneArena;
use super::topology::Topology;
use super::weights::WeightStore;

/// Lit segments per digit, ordered `a..g` (see [`super::layout::segment_endpoints`]).
pub const DIGIT_SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],     // 0
    [false, true, true, false, false, false, false], // 1
    [true, true, false, true, true, false, true],    // 2
    [true, true, true, true, false, false, true],    // 3
    [false, true, true, false, false, true, true],   // 4
    [true, false, true, true, false, true, true],    // 5
    [true, false, true, true, true, true, true],     // 6
    [true, true, true, false, false, false, false],  // 7
    [true, true, true, true, true, true, true],      // 8
    [true, true, true, true, false, true, true],     // 9
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeAppearance {
    pub color: [f32; 3],
    pub opacity: f32,
    pub thickness: f32,
}

impl EdgeAppearance {
    pub const NEUTRAL: Self = Self {
        color: EDGE_NEUTRAL_COLOR,
        opacity: EDGE_NEUTRAL_OPACITY,
        thickness: EDGE_NEUTRAL_THICKNESS,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentAppearance {
    pub intensity: f32,
    pub color: [f32; 3],
}

/// Power-law remap of a normalized magnitude: `n^(1/gamma)`.
///
/// Gamma above 1 lifts small magnitudes so weak wires stay visible.
#[inline]
pub fn gamma_correct(normalized: f32, gamma: f32) -> f32 {
    normalized.clamp(0.0, 1.0).powf(1.0 / gamma)
}

pub fn edge_appearance(activation: f32, gamma: f32) -> EdgeAppearance {
    if !activation.is_finite() || activation.abs() < EDGE_ACTIVATION_EPSILON {
        return EdgeAppearance::NEUTRAL;
    }
    let color = if activation >= 0.0 {
        EDGE_POSITIVE_COLOR
    } else {
        EDGE_NEGATIVE_COLOR
    };
    let normalized = activation.abs().min(EDGE_MAGNITUDE_CEILING) / EDGE_MAGNITUDE_CEILING;
    let corrected = gamma_correct(normalized, gamma);
    EdgeAppearance {
        color,
        opacity: EDGE_OPACITY_BASE + corrected * EDGE_OPACITY_SPAN,
        thickness: EDGE_THICKNESS_BASE + corrected * EDGE_THICKNESS_SPAN,
    }
}

#[inline]
pub fn input_intensity(value: f32, policy: InteractionPolicy) -> f32 {
    match policy {
        InteractionPolicy::Toggle => value * TOGGLE_INPUT_SCALE,
        InteractionPolicy::Draw => value,
    }
}

#[inline]
pub fn hidden_intensity(activation: f32) -> f32 {
    activation.abs() * ACTIVATION_INTENSITY_SCALE
}

#[inline]
pub fn output_intensity(probability: f32) -> f32 {
    probability * ACTIVATION_INTENSITY_SCALE
}

pub fn segment_appearance(digit: usize, segment: usize, probability: f32) -> SegmentAppearance {
    let lit = DIGIT_SEGMENTS
        .get(digit)
        .and_then(|row| row.get(segment))
        .copied()
        .unwrap_or(false);
    if !lit {
        return SegmentAppearance {
            intensity: SEGMENT_OFF_INTENSITY,
            color: SEGMENT_OFF_COLOR,
        };
    }
    let color = if probability >= SEGMENT_BRIGHT_CUTOFF {
        SEGMENT_BRIGHT_COLOR
    } else {
        SEGMENT_DIM_COLOR
    };
    SegmentAppearance {
        intensity: (probability * SEGMENT_ON_GAIN).max(SEGMENT_ON_FLOOR),
        color,
    }
}

/// Write node, edge and segment attributes for the current state.
pub fn encode_scene(
    arena: &mut SceneArena,
    topology: &Topology,
    input: &[f32],
    activations: &Activations,
    weights: &WeightStore,
    options: &TwinOptions,
) {
    for (i, &value) in input.iter().enumerate().take(topology.input_size) {
        if let Some(node) = arena.node_mut(Layer::Input, i) {
            node.emissive_intensity = input_intensity(value, options.policy);
        }
    }
    for (j, &a) in activations.hidden.iter().enumerate() {
        if let Some(node) = arena.node_mut(Layer::Hidden, j) {
            node.emissive_intensity = hidden_intensity(a);
        }
    }
    for (k, &p) in activations.output.iter().enumerate() {
        if let Some(node) = arena.node_mut(Layer::Output, k) {
            node.emissive_intensity = output_intensity(p);
        }
    }

    encode_edges(
        arena,
        Layer::Input,
        input,
        weights.dense_0(),
        topology.input_size,
        topology.hidden_size,
        options.gamma,
    );
    encode_edges(
        arena,
        Layer::Hidden,
        &activations.hidden,
        weights.dense_1(),
        topology.hidden_size,
        topology.output_size,
        options.gamma,
    );

    if options.output == OutputEncoding::SevenSegment {
        for (digit, &p) in activations.output.iter().enumerate() {
            for segment in 0..7 {
                if let Some(seg) = arena.segment_mut(digit, segment) {
                    let look = segment_appearance(digit, segment, p);
                    seg.intensity = look.intensity;
                    seg.color = look.color;
                }
            }
        }
    }
}

fn encode_edges(
    arena: &mut SceneArena,
    from_layer: Layer,
    source: &[f32],
    weights: &[f32],
    from_size: usize,
    to_size: usize,
    gamma: f32,
) {
    for from in 0..from_size {
        let value = source.get(from).copied().unwrap_or(0.0);
        for to in 0..to_size {
            // absent weights leave the edge as it was
            let Some(&w) = weights.get(from * to_size + to) else {
                continue;
            };
            if let Some(edge) = arena.edge_mut(from_layer, from, to) {
                let look = edge_appearance(value * w, gamma);
                edge.color = look.color;
                edge.opacity = look.opacity;
                edge.thickness = look.thickness;
            }
        }
    }
}

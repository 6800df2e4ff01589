//! Arena of scene primitives keyed by stable identifiers, plus the builder
//! that creates and rebuilds them for a topology.
//!
//! The renderer reads the arena every frame; the encoder only mutates
//! attributes of primitives that already exist. Structural changes happen
//! exclusively through [`build`] and [`rebuild_hidden`], which always
//! bulk-delete before bulk-inserting.

use super::constants::*;
use super::encode::DIGIT_SEGMENTS;
use super::layout::{node_position, segment_endpoints, Layer};
use super::topology::Topology;
use fnv::FnvHashMap;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub layer: Layer,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub from_layer: Layer,
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    pub digit: usize,
    pub segment: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
    pub layer: Layer,
    pub index: usize,
    pub position: Vec3,
    pub emissive_intensity: f32,
    pub color: [f32; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisual {
    pub from_layer: Layer,
    pub from_index: usize,
    pub to_index: usize,
    pub start: Vec3,
    pub end: Vec3,
    pub color: [f32; 3],
    pub opacity: f32,
    pub thickness: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SegmentVisual {
    pub digit: usize,
    pub segment: usize,
    pub start: Vec3,
    pub end: Vec3,
    pub intensity: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Default)]
pub struct SceneArena {
    nodes: FnvHashMap<NodeKey, NodeVisual>,
    edges: FnvHashMap<EdgeKey, EdgeVisual>,
    segments: FnvHashMap<SegmentKey, SegmentVisual>,
}

impl SceneArena {
    pub fn node(&self, layer: Layer, index: usize) -> Option<&NodeVisual> {
        self.nodes.get(&NodeKey { layer, index })
    }

    pub fn node_mut(&mut self, layer: Layer, index: usize) -> Option<&mut NodeVisual> {
        self.nodes.get_mut(&NodeKey { layer, index })
    }

    pub fn edge(&self, from_layer: Layer, from: usize, to: usize) -> Option<&EdgeVisual> {
        self.edges.get(&EdgeKey {
            from_layer,
            from,
            to,
        })
    }

    pub fn edge_mut(&mut self, from_layer: Layer, from: usize, to: usize) -> Option<&mut EdgeVisual> {
        self.edges.get_mut(&EdgeKey {
            from_layer,
            from,
            to,
        })
    }

    pub fn segment(&self, digit: usize, segment: usize) -> Option<&SegmentVisual> {
        self.segments.get(&SegmentKey { digit, segment })
    }

    pub fn segment_mut(&mut self, digit: usize, segment: usize) -> Option<&mut SegmentVisual> {
        self.segments.get_mut(&SegmentKey { digit, segment })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeVisual> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeVisual> {
        self.edges.values()
    }

    pub fn segments(&self) -> impl Iterator<Item = &SegmentVisual> {
        self.segments.values()
    }

    pub fn layer_nodes(&self, layer: Layer) -> impl Iterator<Item = &NodeVisual> {
        self.nodes.values().filter(move |n| n.layer == layer)
    }

    pub fn node_count(&self, layer: Layer) -> usize {
        self.layer_nodes(layer).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.segments.clear();
    }

    fn insert_layer(&mut self, layer: Layer, size: usize) {
        let color = layer_color(layer);
        for index in 0..size {
            self.nodes.insert(
                NodeKey { layer, index },
                NodeVisual {
                    layer,
                    index,
                    position: node_position(layer, index, size),
                    emissive_intensity: IDLE_INTENSITY,
                    color,
                },
            );
        }
    }

    fn insert_edges(&mut self, from_layer: Layer, from_size: usize, to_layer: Layer, to_size: usize) {
        self.edges.reserve(from_size * to_size);
        for from in 0..from_size {
            let start = node_position(from_layer, from, from_size);
            for to in 0..to_size {
                self.edges.insert(
                    EdgeKey {
                        from_layer,
                        from,
                        to,
                    },
                    EdgeVisual {
                        from_layer,
                        from_index: from,
                        to_index: to,
                        start,
                        end: node_position(to_layer, to, to_size),
                        color: EDGE_NEUTRAL_COLOR,
                        opacity: EDGE_NEUTRAL_OPACITY,
                        thickness: EDGE_NEUTRAL_THICKNESS,
                    },
                );
            }
        }
    }

    fn insert_segments(&mut self, output_size: usize) {
        for digit in 0..output_size.min(DIGIT_SEGMENTS.len()) {
            for segment in 0..7 {
                let (start, end) = segment_endpoints(digit, segment, output_size);
                self.segments.insert(
                    SegmentKey { digit, segment },
                    SegmentVisual {
                        digit,
                        segment,
                        start,
                        end,
                        intensity: SEGMENT_OFF_INTENSITY,
                        color: SEGMENT_OFF_COLOR,
                    },
                );
            }
        }
    }
}

#[inline]
pub fn layer_color(layer: Layer) -> [f32; 3] {
    match layer {
        Layer::Input => INPUT_COLOR,
        Layer::Hidden => HIDDEN_COLOR,
        Layer::Output => OUTPUT_COLOR,
    }
}

/// Create every primitive for `topology` from scratch.
pub fn build(arena: &mut SceneArena, topology: &Topology, segments: bool) {
    arena.clear();
    arena.insert_layer(Layer::Input, topology.input_size);
    arena.insert_layer(Layer::Hidden, topology.hidden_size);
    arena.insert_layer(Layer::Output, topology.output_size);
    arena.insert_edges(
        Layer::Input,
        topology.input_size,
        Layer::Hidden,
        topology.hidden_size,
    );
    arena.insert_edges(
        Layer::Hidden,
        topology.hidden_size,
        Layer::Output,
        topology.output_size,
    );
    if segments {
        arena.insert_segments(topology.output_size);
    }
    log::info!(
        "[scene] built {} nodes, {} edges, {} segments",
        arena.nodes.len(),
        arena.edges.len(),
        arena.segments.len()
    );
}

/// Replace the hidden layer and both edge sets touching it.
///
/// Input/output nodes and segments are left untouched.
pub fn rebuild_hidden(arena: &mut SceneArena, topology: &Topology) {
    arena.nodes.retain(|k, _| k.layer != Layer::Hidden);
    // input edges end in the hidden layer, hidden edges start there
    arena
        .edges
        .retain(|k, _| !matches!(k.from_layer, Layer::Input | Layer::Hidden));

    arena.insert_layer(Layer::Hidden, topology.hidden_size);
    arena.insert_edges(
        Layer::Input,
        topology.input_size,
        Layer::Hidden,
        topology.hidden_size,
    );
    arena.insert_edges(
        Layer::Hidden,
        topology.hidden_size,
        Layer::Output,
        topology.output_size,
    );
    log::info!(
        "[scene] rebuilt hidden layer: {} nodes, {} edges",
        topology.hidden_size,
        arena.edges.len()
    );
}

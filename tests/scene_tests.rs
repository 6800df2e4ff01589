// Host-side tests for layout and the primitive arena.

use nn_twin::core::constants::*;
use nn_twin::core::layout::{grid_side, node_position, segment_endpoints, Layer};
use nn_twin::core::scene::{self, layer_color};
use nn_twin::core::{SceneArena, Topology};

fn built(hidden: usize, segments: bool) -> (SceneArena, Topology) {
    let topology = Topology::new(25, hidden, 10).unwrap();
    let mut arena = SceneArena::default();
    scene::build(&mut arena, &topology, segments);
    (arena, topology)
}

fn assert_consistent(arena: &SceneArena, topology: &Topology) {
    assert_eq!(arena.node_count(Layer::Input), topology.input_size);
    assert_eq!(arena.node_count(Layer::Hidden), topology.hidden_size);
    assert_eq!(arena.node_count(Layer::Output), topology.output_size);
    assert_eq!(arena.edge_count(), topology.edge_count());
    for node in arena.layer_nodes(Layer::Hidden) {
        assert!(node.index < topology.hidden_size);
    }
    for edge in arena.edges() {
        match edge.from_layer {
            Layer::Input => {
                assert!(edge.from_index < topology.input_size);
                assert!(edge.to_index < topology.hidden_size);
            }
            Layer::Hidden => {
                assert!(edge.from_index < topology.hidden_size);
                assert!(edge.to_index < topology.output_size);
            }
            Layer::Output => panic!("edge leaving the output layer"),
        }
    }
}

#[test]
fn grid_side_covers_layer() {
    assert_eq!(grid_side(25), 5);
    assert_eq!(grid_side(26), 6);
    assert_eq!(grid_side(1), 1);
    assert_eq!(grid_side(0), 1);
}

#[test]
fn layout_is_deterministic_and_ordered() {
    for (layer, size) in [(Layer::Input, 25), (Layer::Hidden, 16), (Layer::Output, 10)] {
        for i in 0..size {
            assert_eq!(node_position(layer, i, size), node_position(layer, i, size));
        }
    }
    assert_eq!(node_position(Layer::Input, 3, 25).x, INPUT_LAYER_X);
    assert_eq!(node_position(Layer::Hidden, 3, 16).x, HIDDEN_LAYER_X);
    assert_eq!(node_position(Layer::Output, 3, 10).x, OUTPUT_LAYER_X);
    // 25 inputs form a centered 5x5 grid
    let center = node_position(Layer::Input, 12, 25);
    assert!(center.y.abs() < 1e-6 && center.z.abs() < 1e-6);
    // columns run top to bottom, centered on y = 0
    let top = node_position(Layer::Output, 0, 10);
    let bottom = node_position(Layer::Output, 9, 10);
    assert!(top.y > bottom.y);
    assert!((top.y + bottom.y).abs() < 1e-6);
}

#[test]
fn segments_sit_beside_their_output_node() {
    for digit in 0..10 {
        let anchor = node_position(Layer::Output, digit, 10);
        for segment in 0..7 {
            let (a, b) = segment_endpoints(digit, segment, 10);
            assert_ne!(a, b);
            for p in [a, b] {
                assert!((p.x - (anchor.x + GLYPH_OFFSET_X)).abs() <= GLYPH_HALF_WIDTH + 1e-6);
                assert!((p.y - anchor.y).abs() <= GLYPH_HALF_HEIGHT + 1e-6);
            }
        }
    }
}

#[test]
fn build_creates_every_primitive() {
    let (arena, topology) = built(16, true);
    assert_consistent(&arena, &topology);
    assert_eq!(arena.edge_count(), 25 * 16 + 16 * 10);
    assert_eq!(arena.segment_count(), 70);

    let (arena, _) = built(16, false);
    assert_eq!(arena.segment_count(), 0);
}

#[test]
fn built_primitives_start_idle() {
    let (arena, _) = built(4, true);
    for node in arena.nodes() {
        assert_eq!(node.emissive_intensity, IDLE_INTENSITY);
        assert_eq!(node.color, layer_color(node.layer));
        assert_eq!(node.position, node_position(node.layer, node.index, match node.layer {
            Layer::Input => 25,
            Layer::Hidden => 4,
            Layer::Output => 10,
        }));
    }
    for edge in arena.edges() {
        assert_eq!(edge.opacity, EDGE_NEUTRAL_OPACITY);
        assert_eq!(edge.thickness, EDGE_NEUTRAL_THICKNESS);
    }
    let edge = arena.edge(Layer::Input, 7, 2).unwrap();
    assert_eq!(edge.start, node_position(Layer::Input, 7, 25));
    assert_eq!(edge.end, node_position(Layer::Hidden, 2, 4));
}

#[test]
fn rebuild_shrinks_without_stale_entries() {
    let (mut arena, _) = built(16, true);
    let inputs_before: Vec<_> = (0..25).map(|i| arena.node(Layer::Input, i).cloned()).collect();

    let smaller = Topology::new(25, 8, 10).unwrap();
    scene::rebuild_hidden(&mut arena, &smaller);
    assert_consistent(&arena, &smaller);
    assert_eq!(arena.edge_count(), 25 * 8 + 8 * 10);
    assert!(arena.node(Layer::Hidden, 8).is_none());
    assert!(arena.node(Layer::Hidden, 15).is_none());
    assert!(arena.edge(Layer::Input, 0, 8).is_none());
    assert!(arena.edge(Layer::Hidden, 12, 0).is_none());
    assert_eq!(arena.segment_count(), 70);

    let inputs_after: Vec<_> = (0..25).map(|i| arena.node(Layer::Input, i).cloned()).collect();
    assert_eq!(inputs_before, inputs_after);
}

#[test]
fn rebuild_grows_with_fresh_layout() {
    let (mut arena, _) = built(4, false);
    let bigger = Topology::new(25, 32, 10).unwrap();
    scene::rebuild_hidden(&mut arena, &bigger);
    assert_consistent(&arena, &bigger);
    assert_eq!(arena.edge_count(), 25 * 32 + 32 * 10);

    // hidden positions follow the new layer size
    for j in 0..32 {
        let node = arena.node(Layer::Hidden, j).unwrap();
        assert_eq!(node.position, node_position(Layer::Hidden, j, 32));
        let edge = arena.edge(Layer::Hidden, j, 0).unwrap();
        assert_eq!(edge.start, node.position);
    }
}

#[test]
fn clear_empties_arena() {
    let (mut arena, _) = built(4, true);
    assert!(!arena.is_empty());
    arena.clear();
    assert!(arena.is_empty());
    assert_eq!(arena.segment_count(), 0);
}

use nn_twin::core::{Topology, TopologyChange, TopologyManager, TopologyPayload, TopologyState};

fn payload(input_size: usize, hidden_size: usize, output_size: usize) -> TopologyPayload {
    TopologyPayload {
        input_size,
        hidden_size,
        output_size,
    }
}

#[test]
fn topology_requires_non_empty_layers() {
    assert!(Topology::new(25, 0, 10).is_none());
    assert!(Topology::new(0, 4, 10).is_none());
    assert!(Topology::new(25, 4, 0).is_none());
    let t = Topology::new(25, 4, 10).unwrap();
    assert_eq!(t.edge_count(), 25 * 4 + 4 * 10);
}

#[test]
fn push_without_topology_keeps_state() {
    let mut mgr = TopologyManager::default();
    assert_eq!(mgr.state(), TopologyState::Uninitialized);
    assert_eq!(mgr.apply(None), TopologyChange::Unchanged);
    assert_eq!(mgr.state(), TopologyState::Uninitialized);
    assert!(mgr.current().is_none());
}

#[test]
fn first_topology_initializes() {
    let mut mgr = TopologyManager::default();
    let expected = Topology::new(25, 16, 10).unwrap();
    assert_eq!(
        mgr.apply(Some(&payload(25, 16, 10))),
        TopologyChange::Initialized(expected)
    );
    assert_eq!(mgr.state(), TopologyState::Ready(expected));
    assert_eq!(mgr.apply(None), TopologyChange::Unchanged);
}

#[test]
fn same_hidden_size_is_a_no_op() {
    let mut mgr = TopologyManager::default();
    mgr.apply(Some(&payload(25, 16, 10)));
    for _ in 0..3 {
        assert_eq!(mgr.apply(Some(&payload(25, 16, 10))), TopologyChange::Unchanged);
    }
}

#[test]
fn hidden_size_change_rebuilds() {
    let mut mgr = TopologyManager::default();
    mgr.apply(Some(&payload(25, 16, 10)));

    let change = mgr.apply(Some(&payload(25, 8, 10)));
    let expected = Topology::new(25, 8, 10).unwrap();
    assert_eq!(
        change,
        TopologyChange::Rebuilt {
            previous_hidden: 16,
            topology: expected
        }
    );
    assert_eq!(mgr.current(), Some(expected));
}

#[test]
fn input_and_output_sizes_are_fixed_after_init() {
    let mut mgr = TopologyManager::default();
    mgr.apply(Some(&payload(25, 16, 10)));

    assert_eq!(mgr.apply(Some(&payload(36, 16, 4))), TopologyChange::Unchanged);
    assert_eq!(mgr.current(), Topology::new(25, 16, 10));

    match mgr.apply(Some(&payload(36, 20, 4))) {
        TopologyChange::Rebuilt { topology, .. } => {
            assert_eq!(topology, Topology::new(25, 20, 10).unwrap());
        }
        other => panic!("expected rebuild, got {:?}", other),
    }
}

#[test]
fn empty_layers_are_ignored() {
    let mut mgr = TopologyManager::default();
    assert_eq!(mgr.apply(Some(&payload(25, 0, 10))), TopologyChange::Unchanged);
    assert_eq!(mgr.state(), TopologyState::Uninitialized);

    mgr.apply(Some(&payload(25, 4, 10)));
    assert_eq!(mgr.apply(Some(&payload(25, 0, 10))), TopologyChange::Unchanged);
    assert_eq!(mgr.current().map(|t| t.hidden_size), Some(4));
}

#[test]
fn oversized_topologies_are_rejected() {
    use nn_twin::core::constants::{MAX_EDGE_COUNT, MAX_HIDDEN_SIZE};

    assert!(Topology::new(25, MAX_HIDDEN_SIZE, 10).is_some());
    assert!(Topology::new(25, MAX_HIDDEN_SIZE + 1, 10).is_none());
    assert!(Topology::new(25, 4_611_686_018_427_387_904, 10).is_none());
    // edge count overflows usize
    assert!(Topology::new(usize::MAX, 2, 10).is_none());
    assert!(Topology::new(25, 2, usize::MAX).is_none());
    // fits in usize but exceeds the edge budget
    assert!(Topology::new(MAX_EDGE_COUNT, 1, 1).is_none());
    assert!(Topology::new(MAX_EDGE_COUNT - 1, 1, 1).is_some());
}

#[test]
fn oversized_hidden_size_leaves_state_alone() {
    let mut mgr = TopologyManager::default();
    assert_eq!(
        mgr.apply(Some(&payload(25, 4_611_686_018_427_387_904, 10))),
        TopologyChange::Unchanged
    );
    assert_eq!(mgr.state(), TopologyState::Uninitialized);

    mgr.apply(Some(&payload(25, 16, 10)));
    assert_eq!(
        mgr.apply(Some(&payload(25, 4_611_686_018_427_387_904, 10))),
        TopologyChange::Unchanged
    );
    assert_eq!(mgr.current().map(|t| t.hidden_size), Some(16));
}

use super::constants::{MAX_EDGE_COUNT, MAX_HIDDEN_SIZE};
use super::protocol::TopologyPayload;

/// Layer sizes of the visualized network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topology {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl Topology {
    /// Returns `None` unless every layer is non-empty, the hidden layer is at
    /// most [`MAX_HIDDEN_SIZE`] and the edge count is at most [`MAX_EDGE_COUNT`].
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Option<Self> {
        if input_size == 0 || hidden_size == 0 || output_size == 0 {
            return None;
        }
        if hidden_size > MAX_HIDDEN_SIZE {
            return None;
        }
        let edges = checked_edge_count(input_size, hidden_size, output_size)?;
        (edges <= MAX_EDGE_COUNT).then_some(Self {
            input_size,
            hidden_size,
            output_size,
        })
    }

    pub fn from_payload(p: &TopologyPayload) -> Option<Self> {
        Self::new(p.input_size, p.hidden_size, p.output_size)
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.input_size * self.hidden_size + self.hidden_size * self.output_size
    }
}

#[inline]
fn checked_edge_count(input_size: usize, hidden_size: usize, output_size: usize) -> Option<usize> {
    input_size
        .checked_mul(hidden_size)?
        .checked_add(hidden_size.checked_mul(output_size)?)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TopologyState {
    #[default]
    Uninitialized,
    Ready(Topology),
}

/// Result of feeding a push's topology field to the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopologyChange {
    Unchanged,
    Initialized(Topology),
    Rebuilt {
        previous_hidden: usize,
        topology: Topology,
    },
}

#[derive(Debug, Default)]
pub struct TopologyManager {
    state: TopologyState,
}

impl TopologyManager {
    pub fn state(&self) -> TopologyState {
        self.state
    }

    pub fn current(&self) -> Option<Topology> {
        match self.state {
            TopologyState::Ready(t) => Some(t),
            TopologyState::Uninitialized => None,
        }
    }

    pub fn apply(&mut self, incoming: Option<&TopologyPayload>) -> TopologyChange {
        let Some(payload) = incoming else {
            return TopologyChange::Unchanged;
        };
        let Some(received) = Topology::from_payload(payload) else {
            log::warn!("[topology] ignoring empty or oversized topology: {:?}", payload);
            return TopologyChange::Unchanged;
        };
        match self.state {
            TopologyState::Uninitialized => {
                self.state = TopologyState::Ready(received);
                log::info!(
                    "[topology] initialized {}-{}-{}",
                    received.input_size,
                    received.hidden_size,
                    received.output_size
                );
                TopologyChange::Initialized(received)
            }
            TopologyState::Ready(current) => {
                if received.input_size != current.input_size
                    || received.output_size != current.output_size
                {
                    log::warn!(
                        "[topology] input/output sizes are fixed at {}/{}; ignoring {}/{}",
                        current.input_size,
                        current.output_size,
                        received.input_size,
                        received.output_size
                    );
                }
                if received.hidden_size == current.hidden_size {
                    return TopologyChange::Unchanged;
                }
                let Some(topology) = Topology::new(
                    current.input_size,
                    received.hidden_size,
                    current.output_size,
                ) else {
                    log::warn!(
                        "[topology] hidden size {} is too large for {}-H-{}",
                        received.hidden_size,
                        current.input_size,
                        current.output_size
                    );
                    return TopologyChange::Unchanged;
                };
                self.state = TopologyState::Ready(topology);
                log::info!(
                    "[topology] hidden size {} -> {}",
                    current.hidden_size,
                    topology.hidden_size
                );
                TopologyChange::Rebuilt {
                    previous_hidden: current.hidden_size,
                    topology,
                }
            }
        }
    }
}

//! The single owned state context of one view.
//!
//! Every inbound push and every pointer interaction goes through
//! [`TwinState`], which recomputes the forward pass and re-encodes the scene
//! synchronously before returning.

use super::config::{clamp_gamma, InteractionPolicy, OutputEncoding, TwinOptions};
use super::constants::PICK_SPHERE_RADIUS;
use super::encode::encode_scene;
use super::forward::{forward_pass, Activations};
use super::input::InputState;
use super::layout::Layer;
use super::pick::{pick_nearest, Ray};
use super::protocol::Push;
use super::scene::{self, SceneArena};
use super::topology::{Topology, TopologyChange, TopologyManager};
use super::weights::WeightStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PushOutcome {
    pub topology: TopologyChange,
    pub weights_updated: bool,
}

#[derive(Debug)]
pub struct TwinState {
    options: TwinOptions,
    topology: TopologyManager,
    weights: WeightStore,
    input: InputState,
    activations: Activations,
    scene: SceneArena,
}

impl TwinState {
    pub fn new(options: TwinOptions) -> Self {
        Self {
            options,
            topology: TopologyManager::default(),
            weights: WeightStore::default(),
            input: InputState::default(),
            activations: Activations::default(),
            scene: SceneArena::default(),
        }
    }

    pub fn options(&self) -> &TwinOptions {
        &self.options
    }

    pub fn topology(&self) -> Option<Topology> {
        self.topology.current()
    }

    pub fn weights(&self) -> &WeightStore {
        &self.weights
    }

    pub fn input_values(&self) -> &[f32] {
        self.input.values()
    }

    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    pub fn activations(&self) -> &Activations {
        &self.activations
    }

    pub fn scene(&self) -> &SceneArena {
        &self.scene
    }

    pub fn gamma(&self) -> f32 {
        self.options.gamma
    }

    /// Apply a remote push: topology first (building or rebuilding the scene),
    /// then weights, then a full recompute.
    pub fn handle_push(&mut self, push: Push) -> PushOutcome {
        let change = self.topology.apply(push.topology.as_ref());
        match change {
            TopologyChange::Unchanged => {}
            TopologyChange::Initialized(t) => {
                self.input = InputState::new(t.input_size);
                self.activations = Activations::default();
                scene::build(
                    &mut self.scene,
                    &t,
                    self.options.output == OutputEncoding::SevenSegment,
                );
            }
            TopologyChange::Rebuilt { topology, .. } => {
                // matrices laid out for the old hidden size are meaningless now
                self.weights.clear();
                self.activations = Activations::default();
                scene::rebuild_hidden(&mut self.scene, &topology);
            }
        }
        let weights_updated = match push.weights {
            Some(w) => self.weights.replace(w),
            None => false,
        };
        if change != TopologyChange::Unchanged || weights_updated {
            self.recompute();
        }
        PushOutcome {
            topology: change,
            weights_updated,
        }
    }

    /// Forward pass plus re-encoding. No-op before the first topology.
    pub fn recompute(&mut self) {
        let Some(topology) = self.topology.current() else {
            return;
        };
        self.activations = forward_pass(self.input.values(), &self.weights, &topology);
        encode_scene(
            &mut self.scene,
            &topology,
            self.input.values(),
            &self.activations,
            &self.weights,
            &self.options,
        );
    }

    /// Nearest input node hit by `ray`.
    pub fn pick_input(&self, ray: &Ray) -> Option<usize> {
        pick_nearest(
            ray,
            self.scene
                .layer_nodes(Layer::Input)
                .map(|n| (n.index, n.position)),
            PICK_SPHERE_RADIUS,
        )
    }

    /// Toggle-policy click. Returns true when the input changed.
    pub fn click(&mut self, hit: Option<usize>) -> bool {
        if self.options.policy != InteractionPolicy::Toggle {
            return false;
        }
        let Some(index) = hit else {
            return false;
        };
        if !self.input.toggle(index) {
            return false;
        }
        self.recompute();
        true
    }

    /// Draw-policy pointer-down. Returns true when a draw gesture started.
    pub fn pointer_down(&mut self, hit: Option<usize>) -> bool {
        if self.options.policy != InteractionPolicy::Draw || self.topology().is_none() {
            return false;
        }
        match hit {
            Some(index) if index < self.input.len() => {
                self.input.begin_draw();
                true
            }
            _ => false,
        }
    }

    /// Draw-policy pointer-move. Returns true when the input changed.
    pub fn pointer_move(&mut self, hit: Option<usize>) -> bool {
        if !self.input.is_drawing() {
            return false;
        }
        let Some(index) = hit else {
            return false;
        };
        if !self.input.draw(index, self.options.draw_increment) {
            return false;
        }
        self.recompute();
        true
    }

    /// Pointer-up and pointer-leave both end a draw gesture.
    pub fn pointer_up(&mut self) {
        self.input.end_draw();
    }

    /// Whether a press should capture the pointer. Draw drags stay uncaptured
    /// so pointer-leave still reaches the view.
    pub fn captures_pointer(&self) -> bool {
        !self.input.is_drawing()
    }

    /// Draw-policy pointer-move with the pointer's position relative to the
    /// view. Leaving the view ends the gesture like pointer-leave does.
    pub fn pointer_move_at(&mut self, hit: Option<usize>, inside: bool) -> bool {
        if !inside {
            self.pointer_up();
            return false;
        }
        self.pointer_move(hit)
    }

    /// Zero the input. Returns true when a topology is known.
    pub fn reset(&mut self) -> bool {
        if self.topology().is_none() {
            return false;
        }
        self.input.reset();
        self.recompute();
        true
    }

    pub fn set_gamma(&mut self, gamma: f32) {
        let gamma = clamp_gamma(gamma);
        if gamma == self.options.gamma {
            return;
        }
        self.options.gamma = gamma;
        self.recompute();
    }
}

pub mod camera;
pub mod config;
pub mod constants;
pub mod encode;
pub mod error;
pub mod forward;
pub mod input;
pub mod layout;
pub mod pick;
pub mod protocol;
pub mod scene;
pub mod topology;
pub mod twin;
pub mod weights;

pub use camera::{Camera, OrbitControls};
pub use config::{InteractionPolicy, OutputEncoding, TwinOptions};
pub use error::TwinError;
pub use forward::{dense_forward, forward_pass, softmax, Activations};
pub use layout::Layer;
pub use pick::Ray;
pub use protocol::{parse_push, Push, TopologyPayload, WeightsPayload};
pub use scene::SceneArena;
pub use topology::{Topology, TopologyChange, TopologyManager, TopologyState};
pub use twin::{PushOutcome, TwinState};
pub use weights::WeightStore;

// Shader bundled as a string constant
pub static TWIN_WGSL: &str = include_str!("../../shaders/twin.wgsl");

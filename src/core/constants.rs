// Shared layout/encoding tuning constants. Pure data, usable on every target.

// Scene layout (world units)
pub const INPUT_LAYER_X: f32 = -4.0;
pub const HIDDEN_LAYER_X: f32 = 0.0;
pub const OUTPUT_LAYER_X: f32 = 4.0;
pub const INPUT_GRID_SPACING: f32 = 0.5;
pub const HIDDEN_SPACING: f32 = 0.6;
pub const OUTPUT_SPACING: f32 = 0.5;
pub const NODE_RADIUS: f32 = 0.15;

// Seven-segment glyphs sit to the right of each output node
pub const GLYPH_OFFSET_X: f32 = 0.45;
pub const GLYPH_HALF_WIDTH: f32 = 0.09;
pub const GLYPH_HALF_HEIGHT: f32 = 0.17;

// Largest accepted hidden layer and total edge count
pub const MAX_HIDDEN_SIZE: usize = 1024;
pub const MAX_EDGE_COUNT: usize = 1 << 18;

// Interaction
pub const PICK_SPHERE_RADIUS: f32 = 0.2; // slightly larger than NODE_RADIUS for easier hits
pub const DEFAULT_DRAW_INCREMENT: f32 = 0.15;

// Gamma control
pub const GAMMA_MIN: f32 = 0.5;
pub const GAMMA_MAX: f32 = 4.0;
pub const GAMMA_STEP: f32 = 0.1;
pub const DEFAULT_GAMMA: f32 = 2.2;

// Node encoding
pub const IDLE_INTENSITY: f32 = 0.1;
pub const ACTIVATION_INTENSITY_SCALE: f32 = 0.8;
pub const TOGGLE_INPUT_SCALE: f32 = 0.8;

// Edge encoding
pub const EDGE_ACTIVATION_EPSILON: f32 = 0.001;
pub const EDGE_MAGNITUDE_CEILING: f32 = 2.0;
pub const EDGE_OPACITY_BASE: f32 = 0.15;
pub const EDGE_OPACITY_SPAN: f32 = 0.75;
pub const EDGE_THICKNESS_BASE: f32 = 1.0;
pub const EDGE_THICKNESS_SPAN: f32 = 3.0;
pub const EDGE_NEUTRAL_OPACITY: f32 = 0.06;
pub const EDGE_NEUTRAL_THICKNESS: f32 = 0.5;

// Seven-segment encoding
pub const SEGMENT_ON_FLOOR: f32 = 0.15;
pub const SEGMENT_ON_GAIN: f32 = 1.2;
pub const SEGMENT_OFF_INTENSITY: f32 = 0.03;
pub const SEGMENT_BRIGHT_CUTOFF: f32 = 0.5;

// Palette (linear RGB)
pub const INPUT_COLOR: [f32; 3] = [0.27, 0.53, 1.0]; // 0x4488ff
pub const HIDDEN_COLOR: [f32; 3] = [0.27, 1.0, 0.53]; // 0x44ff88
pub const OUTPUT_COLOR: [f32; 3] = [1.0, 0.53, 0.27]; // 0xff8844
pub const EDGE_POSITIVE_COLOR: [f32; 3] = [0.27, 1.0, 0.27];
pub const EDGE_NEGATIVE_COLOR: [f32; 3] = [1.0, 0.27, 0.27];
pub const EDGE_NEUTRAL_COLOR: [f32; 3] = [0.27, 0.27, 0.27];
pub const SEGMENT_DIM_COLOR: [f32; 3] = [1.0, 0.55, 0.2];
pub const SEGMENT_BRIGHT_COLOR: [f32; 3] = [0.3, 1.0, 0.6];
pub const SEGMENT_OFF_COLOR: [f32; 3] = [0.2, 0.2, 0.22];

// Orbit camera
pub const CAMERA_DISTANCE: f32 = 8.0;
pub const CAMERA_FOVY_DEGREES: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 0.001; // per wheel delta unit
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;
pub const ORBIT_MAX_PITCH: f32 = 1.5; // radians, just short of the pole

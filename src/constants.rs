// Frontend tuning constants: renderer pixel sizes and colors, pointer
// thresholds. Layout and encoding constants live in `core::constants`.

// Edge thickness units to screen pixels
pub const EDGE_PX_PER_THICKNESS: f32 = 1.5;
pub const SEGMENT_THICKNESS_PX: f32 = 4.0;

// Segment intensity to line alpha
pub const SEGMENT_ALPHA_GAIN: f32 = 1.6;

// Background (0x111111)
pub const CLEAR_RGB: [f64; 3] = [0.067, 0.067, 0.067];

// Pointer travel (px) after which a press no longer counts as a click
pub const CLICK_SLOP_PX: f32 = 4.0;

// Initial instance buffer capacities
pub const INITIAL_LINE_CAPACITY: usize = 1024;
pub const INITIAL_NODE_CAPACITY: usize = 64;

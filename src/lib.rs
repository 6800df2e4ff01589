//! Live 3D view of a small feed-forward network.
//!
//! `core` is platform independent (forward pass, visual encoding, topology
//! tracking, scene arena, picking) and builds on every target. The remaining
//! modules are the browser frontend and only exist on wasm32.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use app::{mount, TwinHandle};

pub mod pointer;

pub use pointer::{wire_pointer_handlers, PointerState, PointerWiring};

//! Input subsystem.

pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use service::{
    spawn_input_thread, InputAction, InputService, InputState, InputStateMachine, PromptKind,
    ScrollDirection,
};

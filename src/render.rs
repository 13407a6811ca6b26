//! Rendering subsystem.
//!
//! The protocol spoken with the view worker, the patch buffer that applies it,
//! and the ratatui terminal that draws the buffer.

pub mod protocol;
pub mod service;
pub mod surface;
pub mod ui;

pub use protocol::{RequestId, ViewCommand, ViewEvent, ViewUpdate, WorkerCommand};
pub use surface::PatchBuffer;

//! Single-writer async runtime around [`AttendanceEngine`](crate::domain::AttendanceEngine).
//!
//! UI events and background fetch completions are funnelled through one
//! task, so the month state is only ever mutated by one event at a time.

/// Event stream types emitted by the runtime.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;

pub use events::EngineEvent;
pub use handle::{spawn_engine, EngineHandle};

//! # Storage Module
//!
//! The remote attendance store is an external collaborator; the engine only
//! knows it through the [`AttendanceStore`] trait. An in-memory
//! implementation backs the CLI and the tests.

pub mod memory;
pub mod traits;

pub use memory::InMemoryAttendanceStore;
pub use traits::AttendanceStore;

//! # IO Module
//!
//! Adapter layer between the engine and whatever drives it. Domain models
//! are translated into the DTOs of the `shared` crate here, so the UI and
//! the attendance store never see internal types.

pub mod mappers;

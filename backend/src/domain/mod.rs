//! # Domain Module
//!
//! Business logic of the attendance engine, independent of any UI framework
//! or storage mechanism.
//!
//! ## Module Organization
//!
//! - **calendar**: month grids, month lengths, working-day counts, navigation
//! - **week_partition**: splitting a month into Sunday-terminated week buckets
//! - **selection**: worked/not-worked state of each grid cell
//! - **aggregate**: weekly and monthly worked-day counts
//! - **reconciliation**: load tokens guarding asynchronous fetch results
//! - **submission**: the monthly payload and its validation
//! - **weekly_summary**: weekly review figures and week overrides
//! - **engine**: the state machine tying the above together per displayed month
//!
//! ## Business Rules
//!
//! - Working days are Monday to Friday; weekends can never count as worked
//! - A week ends on Sunday or on the last day of the month
//! - The monthly worked-day count always equals the sum of the weekly counts
//! - Only the fetch started by the latest month change may update the grid

pub mod aggregate;
pub mod calendar;
pub mod commands;
pub mod engine;
pub mod models;
pub mod reconciliation;
pub mod selection;
pub mod submission;
pub mod week_partition;
pub mod weekly_summary;

pub use calendar::*;
pub use commands::*;
pub use engine::*;
pub use reconciliation::*;
pub use selection::*;
pub use submission::*;
pub use week_partition::*;
pub use weekly_summary::*;

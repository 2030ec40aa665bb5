//! # Attendance Backend
//!
//! Non-UI logic for marking worked days in a month and turning them into
//! weekly and monthly attendance figures.
//!
//! ## Architecture
//!
//! ```text
//! UI layer (month selector, calendar grid, submit button)
//!     ↓
//! Runtime (single-writer event loop, background fetches)
//!     ↓
//! Domain (calendar, week buckets, selection, aggregates, submission)
//!     ↓
//! Storage (remote attendance store behind a trait)
//! ```
//!
//! The engine never talks to the network itself: persisted dates and
//! submissions go through [`storage::AttendanceStore`], and every fetch
//! result is checked against the latest load token before it may touch
//! the displayed month.

pub mod config;
pub mod domain;
pub mod io;
pub mod runtime;
pub mod storage;

pub use config::AppConfig;
pub use domain::models::{CalendarCell, EmployeeId, EngineError, LoadToken, MonthContext, WeekBucket};
pub use domain::{AttendanceEngine, CalendarService, ReconciliationOutcome, ReconciliationRequest};
pub use runtime::{spawn_engine, EngineEvent, EngineHandle};
pub use storage::{AttendanceStore, InMemoryAttendanceStore};

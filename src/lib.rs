//! Recurring group-meeting scheduling.
//!
//! Assigns people to meetings over a multi-day horizon of timeslots,
//! respecting per-person availability and a group-size band, while
//! maximizing either total attendance or the number of person-pairs
//! who share at least one meeting.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `AvailabilityMatrix`, `SchedulingParameters`,
//!   `Objective`, `Schedule`, `ScheduleLabels`, `MeetingRow`, `Violation`
//! - **`validation`**: Parameter and shape checks run before model construction
//! - **`milp`**: The MILP formulation: capacity planning, model building,
//!   objective strategies, the solver gateway, and solution decoding
//! - **`scheduler`**: End-to-end pipeline and schedule KPIs
//!
//! # Architecture
//!
//! The crate owns the problem encoding only. Search is delegated to an
//! external solver behind the `SolverGateway` trait; the default gateway
//! uses `good_lp` with the pure-Rust `microlp` backend.
//!
//! # References
//!
//! - Wolsey (2020), "Integer Programming", Ch. 1.9 (logical constraints)
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod error;
pub mod milp;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;

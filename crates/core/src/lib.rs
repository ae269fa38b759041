//! Domain logic for the asset lifecycle engine.
//!
//! Pure types and rules shared by the persistence and API layers:
//! the error taxonomy, the lifecycle transition planner, and lot
//! expansion. Nothing here performs I/O.

pub mod error;
pub mod lifecycle;
pub mod lot;
pub mod types;

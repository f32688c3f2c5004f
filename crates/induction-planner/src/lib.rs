//! Fleet induction planning.
//!
//! Scores each vehicle in a daily fleet snapshot, assigns it to service, standby, or
//! maintenance through an ordered rule table, and compares what-if scenarios against a
//! baseline allocation. The HTTP router and fleet snapshot import/export live beside the
//! engine so the service binary stays a thin shell.

pub mod config;
pub mod error;
pub mod fleet;
pub mod planning;
pub mod telemetry;

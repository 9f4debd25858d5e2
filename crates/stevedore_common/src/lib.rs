//! Shared diagnostics and telemetry for the stevedore workspace.

pub mod diagnostic;
pub mod telemetry;

#![deny(warnings)]

mod advisor;
mod error;
mod provider;
mod settings;
mod telemetry;

pub use advisor::{Advisor, DebugAnnotation, TickOutcome};
pub use error::AdvisorError;
pub use provider::FloorProvider;
pub use settings::{AdvisorSettings, DEBUG_OVERLAY_ENV, PROFILE_ENV};

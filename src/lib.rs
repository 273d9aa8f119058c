//! Compose CloudWatch dashboards and alarms from a discovered resource list.
//!
//! The pipeline is: load [`config::GlobalConfig`], load the resource list,
//! [`compose`] it into rows and alarms, then [`render_document`] the result.

pub mod cloudwatch;
pub mod config;
pub mod error;
pub mod resource;
pub mod widgetsets;

/// Version injected at compile time via CWDASH_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("CWDASH_VERSION") {
    Some(v) => v,
    None => "dev",
};

pub use cloudwatch::{render_document, DashboardDocument};
pub use config::GlobalConfig;
pub use error::{Error, Result};
pub use resource::{compose, CompositionResult, ResourceDescriptor, ResourceKind};

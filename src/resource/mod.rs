//! Resource abstraction layer
//!
//! Everything between the raw resource inventory and the widget sets.
//!
//! # Architecture
//!
//! - [`arn`] - Positional parsing of resource identifiers
//! - [`registry`] - Loads identifier matching rules from embedded JSON
//! - [`descriptor`] - Raw resource records and typed field access
//! - [`loader`] - Reads the inventory file written by discovery
//! - [`dispatch`] - Maps each resource to its widget set and collects output
//!
//! # Kind Rules
//!
//! Kinds are resolved from identifiers using `src/resources/kinds.json`, so
//! the matching rules can change without touching the widget sets. A `Kind`
//! field on the record overrides the rules.
//!
//! # Example
//!
//! ```ignore
//! use cwdash::config::GlobalConfig;
//! use cwdash::resource::{compose, load_resources};
//!
//! fn build(config: &GlobalConfig) -> anyhow::Result<()> {
//!     let resources = load_resources("resources.json".as_ref())?;
//!     let result = compose(&resources, config);
//!     println!("{} widgets", result.widgets().count());
//!     Ok(())
//! }
//! ```

pub mod arn;
pub mod descriptor;
pub mod dispatch;
mod loader;
mod registry;

pub use arn::Arn;
pub use descriptor::{ResourceDescriptor, Tag};
pub use dispatch::{build_resource, compose, CompositionResult, SkippedResource};
pub use loader::{load_resources, parse_resources};
pub use registry::*;

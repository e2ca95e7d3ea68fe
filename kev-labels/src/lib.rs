//! Label defaults for kev override documents.
//!
//! This crate owns the canonical base label tables and everything that derives label values
//! from a source configuration. Applying changes is the `kev-patch` crate's job.

pub mod config;
mod extract;
mod quantity;
mod tables;

pub use extract::{
    DeployConfig, ResourceSpec, Resources, SourceService, SourceVolume, UpdateConfig,
    extract_deployment_labels, extract_volume_labels, service_from_source, set_default_labels,
};
pub use quantity::format_memory_quantity;
pub use tables::{LabelTables, condense_labels, keys};

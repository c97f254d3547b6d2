#![allow(clippy::doc_markdown)] // Allow technical terms in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Cluster Configuration Core
//!
//! Declare a piece of cluster state once, at a single control point, and have it
//! applied to every live member, recorded in the group's shared configuration
//! document, and reported back as one composite result.
//!
//! ## Architecture
//!
//! Element-type specific behavior lives behind three traits, looked up through
//! the [`registry::ElementRegistry`]:
//!
//! - [`validation::ConfigurationValidator`] applies defaults and rejects bad input
//! - [`mutation::ConfigurationMutator`] changes the persisted document
//! - [`realization::ConfigurationRealizer`] changes a member's live runtime
//!
//! The [`management::ManagementService`] composes them with
//! [`membership`], [`invocation`] and [`persistence`] and never looks at concrete
//! element types itself.
//!
//! ## Module Organization
//!
//! - [`model`] - Elements, documents, statuses and the composite result
//! - [`config`] - Layered configuration (defaults, TOML file, environment)
//! - [`errors`] - Typed errors and their HTTP-style status codes
//! - [`logging`] - Structured logging with per-request correlation ids
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cluster_config::config::ConfigLoader;
//! use cluster_config::logging;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod invocation;
pub mod logging;
pub mod management;
pub mod membership;
pub mod model;
pub mod mutation;
pub mod persistence;
pub mod realization;
pub mod registry;
pub mod validation;

pub use crate::config::{ConfigLoader, ManagementConfig};
pub use errors::{ClusterError, ClusterResult};
pub use management::{ClusterManagement, ManagementResponse, ManagementService};
pub use membership::TargetScope;
pub use model::{
    CacheElementOperation, ClusterManagementResult, ConfigurationDocument, ConfigurationElement,
    ElementId, ElementType, GatewayReceiverConfig, MemberRef, RegionConfig, Status, StatusResult,
};
pub use registry::ElementRegistry;

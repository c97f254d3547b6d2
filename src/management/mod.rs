//! # Cluster Management
//!
//! The control point for cluster-wide configuration changes. A create request
//! moves through these stages, and only the first three can end it early:
//!
//! ```text
//! validate -> pre-check (persisted document) -> resolve targets
//!          -> realize on every target member -> persist -> ClusterManagementResult
//! ```
//!
//! Once a member has been contacted the caller always gets a
//! [`ClusterManagementResult`](crate::model::ClusterManagementResult).
//! Member failures and persistence failures are recorded in it, and members
//! that already applied the change are not rolled back.
//!
//! ## Usage
//!
//! ```rust
//! use cluster_config::config::ManagementConfig;
//! use cluster_config::invocation::LocalTransport;
//! use cluster_config::management::{ClusterManagement, ManagementService};
//! use cluster_config::membership::{MemberInfo, StaticMembership, TargetScope};
//! use cluster_config::model::RegionConfig;
//! use cluster_config::realization::{CacheElementFunction, InMemoryCache};
//! use cluster_config::registry::ElementRegistry;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let registry = Arc::new(ElementRegistry::with_default_elements());
//! let transport = LocalTransport::new();
//! transport.register(
//!     Arc::new(InMemoryCache::new("server-1")),
//!     CacheElementFunction::new(Arc::clone(&registry)),
//! );
//!
//! let service = ManagementService::builder(ManagementConfig::default())
//!     .with_registry(registry)
//!     .with_membership(Arc::new(StaticMembership::with_members([MemberInfo::server("server-1")])))
//!     .with_transport(Arc::new(transport))
//!     .build()
//!     .unwrap();
//!
//! let result = service
//!     .create(RegionConfig::named("customers").into(), TargetScope::cluster())
//!     .await
//!     .unwrap();
//! assert!(result.is_successful());
//! # });
//! ```

mod response;
mod service;

pub use response::ManagementResponse;
pub use service::{ManagementService, ManagementServiceBuilder};

use crate::errors::ClusterResult;
use crate::membership::TargetScope;
use crate::model::{ClusterManagementResult, ConfigurationElement};
use async_trait::async_trait;

/// Create, update and delete cluster-wide configuration elements.
#[async_trait]
pub trait ClusterManagement: Send + Sync {
    async fn create(
        &self,
        element: ConfigurationElement,
        scope: TargetScope,
    ) -> ClusterResult<ClusterManagementResult>;

    async fn update(
        &self,
        element: ConfigurationElement,
        scope: TargetScope,
    ) -> ClusterResult<ClusterManagementResult>;

    async fn delete(
        &self,
        element: ConfigurationElement,
        scope: TargetScope,
    ) -> ClusterResult<ClusterManagementResult>;
}

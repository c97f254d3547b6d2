//! # Configuration Model
//!
//! Types shared by every stage of a management request: the configuration
//! elements themselves, the group-scoped persisted document, member identities,
//! and the status/result structures reported back to the caller.

pub mod document;
pub mod element;
pub mod gateway_receiver;
pub mod member;
pub mod region;
pub mod result;
pub mod status;

pub use document::ConfigurationDocument;
pub use element::{CacheElementOperation, ConfigurationElement, ElementId, ElementType};
pub use gateway_receiver::GatewayReceiverConfig;
pub use member::MemberRef;
pub use region::{
    DataPolicy, EvictionAction, EvictionAttributes, RegionAttributes, RegionConfig, RegionType,
};
pub use result::ClusterManagementResult;
pub use status::{RealizationResult, Status, StatusResult};

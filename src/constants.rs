//! # System Constants
//!
//! Defaults and fixed names shared across validation, realization and the
//! management service.

/// Group that addresses every member and the cluster-wide document.
pub const DEFAULT_CLUSTER_GROUP: &str = "cluster";

/// Identity name of the (single) gateway receiver element of a group.
pub const GATEWAY_RECEIVER_ID: &str = "gateway-receiver";

pub const STATUS_APPLIED_MESSAGE: &str = "Successfully applied configuration change.";
pub const STATUS_FAILED_MESSAGE: &str = "Failed to apply configuration change.";

/// Region defaults and limits.
pub mod region {
    pub const MAX_REDUNDANT_COPIES: u32 = 3;
    /// Prefix reserved for internal regions.
    pub const RESERVED_NAME_PREFIX: &str = "__";
    pub const NAME_SEPARATOR: char = '/';
}

/// Gateway receiver defaults.
pub mod gateway_receiver {
    pub const DEFAULT_START_PORT: u32 = 5000;
    pub const DEFAULT_END_PORT: u32 = 5500;
    pub const DEFAULT_MAXIMUM_TIME_BETWEEN_PINGS_MS: u32 = 60_000;
    pub const DEFAULT_SOCKET_BUFFER_SIZE: u32 = 524_288;
    pub const DEFAULT_MANUAL_START: bool = false;
    pub const DEFAULT_BIND_ADDRESS: &str = "";
    pub const MAX_PORT: u32 = 65_535;
}

/// Configuration loading.
pub mod system {
    pub const CONFIG_ENV_PREFIX: &str = "CLUSTER_MGMT";
    pub const CONFIG_ENV_SEPARATOR: &str = "__";
    pub const DEFAULT_CONFIG_FILE: &str = "config/cluster-management";
    pub const DEFAULT_MEMBER_TIMEOUT_MS: u64 = 5_000;
    pub const DEFAULT_PERSISTENCE_DIRECTORY: &str = "cluster_config";
}

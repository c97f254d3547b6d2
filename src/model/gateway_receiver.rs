//! Gateway receiver element: the WAN endpoint a member listens on.

use serde::{Deserialize, Serialize};

/// Gateway receiver descriptor. All fields are optional until validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayReceiverConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname_for_senders: Option<String>,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_time_between_pings: Option<u32>,
    /// Bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_buffer_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_start: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gateway_transport_filters: Vec<String>,
}

impl GatewayReceiverConfig {
    pub fn with_port_range(mut self, start_port: u32, end_port: u32) -> Self {
        self.start_port = Some(start_port);
        self.end_port = Some(end_port);
        self
    }
}

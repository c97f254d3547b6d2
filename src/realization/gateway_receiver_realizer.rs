use super::runtime::{CacheRuntime, GatewayReceiverSettings, LiveGatewayReceiver};
use super::{wrong_element_type, ConfigurationRealizer};
use crate::constants::gateway_receiver::{
    DEFAULT_BIND_ADDRESS, DEFAULT_END_PORT, DEFAULT_MANUAL_START,
    DEFAULT_MAXIMUM_TIME_BETWEEN_PINGS_MS, DEFAULT_SOCKET_BUFFER_SIZE, DEFAULT_START_PORT,
};
use crate::model::{
    ConfigurationElement, ElementId, ElementType, GatewayReceiverConfig, RealizationResult,
};

/// A member runs at most one gateway receiver, so `exists` only asks whether
/// the runtime has any receiver at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayReceiverRealizer;

fn settings_of(config: &GatewayReceiverConfig) -> GatewayReceiverSettings {
    GatewayReceiverSettings {
        start_port: config.start_port.unwrap_or(DEFAULT_START_PORT),
        end_port: config.end_port.unwrap_or(DEFAULT_END_PORT),
        bind_address: config
            .bind_address
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        hostname_for_senders: config.hostname_for_senders.clone(),
        maximum_time_between_pings: config
            .maximum_time_between_pings
            .unwrap_or(DEFAULT_MAXIMUM_TIME_BETWEEN_PINGS_MS),
        socket_buffer_size: config
            .socket_buffer_size
            .unwrap_or(DEFAULT_SOCKET_BUFFER_SIZE),
        manual_start: config.manual_start.unwrap_or(DEFAULT_MANUAL_START),
        transport_filters: config.gateway_transport_filters.clone(),
    }
}

fn config_of(receiver: LiveGatewayReceiver) -> GatewayReceiverConfig {
    let settings = receiver.settings;
    GatewayReceiverConfig {
        start_port: Some(settings.start_port),
        end_port: Some(settings.end_port),
        bind_address: Some(settings.bind_address),
        hostname_for_senders: settings.hostname_for_senders,
        maximum_time_between_pings: Some(settings.maximum_time_between_pings),
        socket_buffer_size: Some(settings.socket_buffer_size),
        manual_start: Some(settings.manual_start),
        gateway_transport_filters: settings.transport_filters,
    }
}

impl ConfigurationRealizer for GatewayReceiverRealizer {
    fn element_type(&self) -> ElementType {
        ElementType::GatewayReceiver
    }

    fn create(
        &self,
        element: &ConfigurationElement,
        runtime: &dyn CacheRuntime,
    ) -> RealizationResult {
        let config = match element {
            ConfigurationElement::GatewayReceiver(config) => config,
            other => {
                return wrong_element_type(ElementType::GatewayReceiver, other.element_type())
            }
        };

        match runtime.create_gateway_receiver(settings_of(config)) {
            Ok(receiver) => {
                let state = if receiver.running { "started" } else { "created" };
                RealizationResult::success(format!(
                    "Gateway receiver {state} on {} using port {}",
                    runtime.member_name(),
                    receiver.port
                ))
            }
            Err(error) => RealizationResult::failure(error.to_string()),
        }
    }

    fn exists(&self, id: &ElementId, runtime: &dyn CacheRuntime) -> bool {
        id.element_type == ElementType::GatewayReceiver && !runtime.gateway_receivers().is_empty()
    }

    fn get(&self, id: &ElementId, runtime: &dyn CacheRuntime) -> Option<ConfigurationElement> {
        if id.element_type != ElementType::GatewayReceiver {
            return None;
        }
        runtime
            .gateway_receivers()
            .into_iter()
            .next()
            .map(|receiver| ConfigurationElement::GatewayReceiver(config_of(receiver)))
    }
}

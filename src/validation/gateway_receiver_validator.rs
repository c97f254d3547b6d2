use super::{ConfigurationValidator, ValidatedElement};
use crate::constants::gateway_receiver::{
    DEFAULT_BIND_ADDRESS, DEFAULT_END_PORT, DEFAULT_MANUAL_START,
    DEFAULT_MAXIMUM_TIME_BETWEEN_PINGS_MS, DEFAULT_SOCKET_BUFFER_SIZE, DEFAULT_START_PORT,
    MAX_PORT,
};
use crate::errors::ValidationError;
use crate::model::{ConfigurationElement, ElementType};

/// Fills unset receiver settings with cluster defaults and checks the port
/// range.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayReceiverConfigValidator;

impl ConfigurationValidator for GatewayReceiverConfigValidator {
    fn element_type(&self) -> ElementType {
        ElementType::GatewayReceiver
    }

    fn set_defaults_and_validate(
        &self,
        element: ConfigurationElement,
    ) -> Result<ValidatedElement, ValidationError> {
        let mut config = match element {
            ConfigurationElement::GatewayReceiver(config) => config,
            other => {
                return Err(ValidationError::ElementTypeMismatch {
                    expected: ElementType::GatewayReceiver,
                    actual: other.element_type(),
                })
            }
        };

        let start_port = check_port("startPort", config.start_port.unwrap_or(DEFAULT_START_PORT))?;
        let end_port = check_port("endPort", config.end_port.unwrap_or(DEFAULT_END_PORT))?;
        if start_port > end_port {
            return Err(ValidationError::invalid_value(
                "startPort",
                start_port,
                format!("start port must not exceed end port {end_port}"),
            ));
        }
        config.start_port = Some(start_port);
        config.end_port = Some(end_port);

        let pings = config
            .maximum_time_between_pings
            .unwrap_or(DEFAULT_MAXIMUM_TIME_BETWEEN_PINGS_MS);
        if pings == 0 {
            return Err(ValidationError::invalid_value(
                "maximumTimeBetweenPings",
                pings,
                "must be a positive number of milliseconds",
            ));
        }
        config.maximum_time_between_pings = Some(pings);

        let buffer = config.socket_buffer_size.unwrap_or(DEFAULT_SOCKET_BUFFER_SIZE);
        if buffer == 0 {
            return Err(ValidationError::invalid_value(
                "socketBufferSize",
                buffer,
                "must be a positive number of bytes",
            ));
        }
        config.socket_buffer_size = Some(buffer);

        config.manual_start = Some(config.manual_start.unwrap_or(DEFAULT_MANUAL_START));
        config.bind_address = Some(
            config
                .bind_address
                .take()
                .map(|address| address.trim().to_string())
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        );
        if let Some(hostname) = config.hostname_for_senders.take() {
            let hostname = hostname.trim();
            if !hostname.is_empty() {
                config.hostname_for_senders = Some(hostname.to_string());
            }
        }
        if config
            .gateway_transport_filters
            .iter()
            .any(|filter| filter.trim().is_empty())
        {
            return Err(ValidationError::invalid_value(
                "gatewayTransportFilters",
                "",
                "transport filter names must not be blank",
            ));
        }

        Ok(ValidatedElement::new(ConfigurationElement::GatewayReceiver(
            config,
        )))
    }
}

fn check_port(field: &str, port: u32) -> Result<u32, ValidationError> {
    if port == 0 || port > MAX_PORT {
        return Err(ValidationError::invalid_value(
            field,
            port,
            format!("ports must be between 1 and {MAX_PORT}"),
        ));
    }
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GatewayReceiverConfig, RegionConfig};

    fn validate(config: GatewayReceiverConfig) -> Result<GatewayReceiverConfig, ValidationError> {
        GatewayReceiverConfigValidator
            .set_defaults_and_validate(config.into())
            .map(|validated| match validated.into_inner() {
                ConfigurationElement::GatewayReceiver(receiver) => receiver,
                other => panic!("unexpected element {other:?}"),
            })
    }

    #[test]
    fn applies_defaults() {
        let receiver = validate(GatewayReceiverConfig::default()).unwrap();
        assert_eq!(receiver.start_port, Some(DEFAULT_START_PORT));
        assert_eq!(receiver.end_port, Some(DEFAULT_END_PORT));
        assert_eq!(
            receiver.maximum_time_between_pings,
            Some(DEFAULT_MAXIMUM_TIME_BETWEEN_PINGS_MS)
        );
        assert_eq!(receiver.socket_buffer_size, Some(DEFAULT_SOCKET_BUFFER_SIZE));
        assert_eq!(receiver.manual_start, Some(false));
        assert_eq!(receiver.bind_address.as_deref(), Some(""));
        assert_eq!(receiver.hostname_for_senders, None);
    }

    #[test]
    fn keeps_explicit_values() {
        let receiver = validate(GatewayReceiverConfig {
            manual_start: Some(true),
            hostname_for_senders: Some(" wan.example.com ".to_string()),
            ..GatewayReceiverConfig::default().with_port_range(6000, 6010)
        })
        .unwrap();
        assert_eq!(receiver.start_port, Some(6000));
        assert_eq!(receiver.end_port, Some(6010));
        assert_eq!(receiver.manual_start, Some(true));
        assert_eq!(receiver.hostname_for_senders.as_deref(), Some("wan.example.com"));
    }

    #[test]
    fn rejects_inverted_port_range() {
        let error = validate(GatewayReceiverConfig::default().with_port_range(7000, 6000)).unwrap_err();
        assert!(matches!(error, ValidationError::InvalidValue { ref field, .. } if field == "startPort"));
    }

    #[test]
    fn rejects_out_of_range_ports() {
        assert!(validate(GatewayReceiverConfig::default().with_port_range(0, 10)).is_err());
        assert!(validate(GatewayReceiverConfig::default().with_port_range(10, 70000)).is_err());
        // only the end port is given, below the default start
        assert!(validate(GatewayReceiverConfig {
            end_port: Some(100),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn rejects_zero_timings() {
        assert!(validate(GatewayReceiverConfig {
            maximum_time_between_pings: Some(0),
            ..Default::default()
        })
        .is_err());
        assert!(validate(GatewayReceiverConfig {
            socket_buffer_size: Some(0),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn rejects_blank_transport_filters() {
        assert!(validate(GatewayReceiverConfig {
            gateway_transport_filters: vec!["compression".to_string(), " ".to_string()],
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn rejects_other_element_types() {
        assert!(GatewayReceiverConfigValidator
            .set_defaults_and_validate(RegionConfig::named("customers").into())
            .is_err());
    }
}

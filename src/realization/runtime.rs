//! Member runtime handle.
//!
//! [`CacheRuntime`] is the only view realizers get of a member: factory and
//! lookup operations for the live objects they manage. [`InMemoryCache`] is a
//! self-contained implementation used for embedded members and tests.

use crate::model::{DataPolicy, EvictionAttributes, RegionType};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Region '{0}' already exists on this member")]
    RegionExists(String),
    #[error("A gateway receiver is already running on this member (port {port})")]
    GatewayReceiverExists { port: u32 },
    #[error("No free port between {start_port} and {end_port}")]
    NoFreePort { start_port: u32, end_port: u32 },
    #[error("Cache runtime unavailable: {0}")]
    Unavailable(String),
}

/// A region as it exists inside a member's cache.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveRegion {
    pub name: String,
    pub region_type: RegionType,
    pub data_policy: DataPolicy,
    pub redundant_copies: Option<u32>,
    pub eviction: Option<EvictionAttributes>,
    pub statistics_enabled: bool,
}

/// Concrete settings a gateway receiver is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReceiverSettings {
    pub start_port: u32,
    pub end_port: u32,
    pub bind_address: String,
    pub hostname_for_senders: Option<String>,
    pub maximum_time_between_pings: u32,
    pub socket_buffer_size: u32,
    pub manual_start: bool,
    pub transport_filters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveGatewayReceiver {
    pub settings: GatewayReceiverSettings,
    /// Port allocated from the configured range.
    pub port: u32,
    pub running: bool,
}

/// Factory and lookup operations a member exposes to realizers.
pub trait CacheRuntime: Send + Sync {
    fn member_name(&self) -> &str;

    fn create_region(&self, region: LiveRegion) -> Result<(), RuntimeError>;

    fn region(&self, name: &str) -> Option<LiveRegion>;

    fn region_names(&self) -> Vec<String>;

    fn create_gateway_receiver(
        &self,
        settings: GatewayReceiverSettings,
    ) -> Result<LiveGatewayReceiver, RuntimeError>;

    fn gateway_receivers(&self) -> Vec<LiveGatewayReceiver>;
}

/// In-process member cache.
#[derive(Debug)]
pub struct InMemoryCache {
    member_name: String,
    regions: DashMap<String, LiveRegion>,
    gateway_receivers: RwLock<Vec<LiveGatewayReceiver>>,
    bound_ports: Mutex<BTreeSet<u32>>,
}

impl InMemoryCache {
    pub fn new(member_name: impl Into<String>) -> Self {
        Self {
            member_name: member_name.into(),
            regions: DashMap::new(),
            gateway_receivers: RwLock::new(Vec::new()),
            bound_ports: Mutex::new(BTreeSet::new()),
        }
    }

    /// Mark ports as taken by something other than a gateway receiver.
    pub fn with_bound_ports(self, ports: impl IntoIterator<Item = u32>) -> Self {
        self.bound_ports.lock().extend(ports);
        self
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}

impl CacheRuntime for InMemoryCache {
    fn member_name(&self) -> &str {
        &self.member_name
    }

    fn create_region(&self, region: LiveRegion) -> Result<(), RuntimeError> {
        match self.regions.entry(region.name.clone()) {
            Entry::Occupied(_) => Err(RuntimeError::RegionExists(region.name)),
            Entry::Vacant(slot) => {
                slot.insert(region);
                Ok(())
            }
        }
    }

    fn region(&self, name: &str) -> Option<LiveRegion> {
        self.regions.get(name).map(|region| region.value().clone())
    }

    fn region_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.regions.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    fn create_gateway_receiver(
        &self,
        settings: GatewayReceiverSettings,
    ) -> Result<LiveGatewayReceiver, RuntimeError> {
        let mut receivers = self.gateway_receivers.write();
        if let Some(existing) = receivers.first() {
            return Err(RuntimeError::GatewayReceiverExists {
                port: existing.port,
            });
        }

        let mut bound_ports = self.bound_ports.lock();
        let port = (settings.start_port..=settings.end_port)
            .find(|port| !bound_ports.contains(port))
            .ok_or(RuntimeError::NoFreePort {
                start_port: settings.start_port,
                end_port: settings.end_port,
            })?;
        bound_ports.insert(port);

        let receiver = LiveGatewayReceiver {
            running: !settings.manual_start,
            settings,
            port,
        };
        receivers.push(receiver.clone());
        Ok(receiver)
    }

    fn gateway_receivers(&self) -> Vec<LiveGatewayReceiver> {
        self.gateway_receivers.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(start_port: u32, end_port: u32) -> GatewayReceiverSettings {
        GatewayReceiverSettings {
            start_port,
            end_port,
            bind_address: String::new(),
            hostname_for_senders: None,
            maximum_time_between_pings: 60_000,
            socket_buffer_size: 524_288,
            manual_start: false,
            transport_filters: Vec::new(),
        }
    }

    fn region(name: &str) -> LiveRegion {
        LiveRegion {
            name: name.to_string(),
            region_type: RegionType::Partition,
            data_policy: DataPolicy::Partition,
            redundant_copies: Some(0),
            eviction: None,
            statistics_enabled: false,
        }
    }

    #[test]
    fn region_names_are_unique() {
        let cache = InMemoryCache::new("server-1");
        cache.create_region(region("customers")).unwrap();

        assert_eq!(
            cache.create_region(region("customers")),
            Err(RuntimeError::RegionExists("customers".to_string()))
        );
        assert_eq!(cache.region_count(), 1);
        assert_eq!(cache.region_names(), vec!["customers".to_string()]);
    }

    #[test]
    fn receiver_takes_first_free_port() {
        let cache = InMemoryCache::new("server-1").with_bound_ports([5000, 5001]);
        let receiver = cache.create_gateway_receiver(settings(5000, 5005)).unwrap();
        assert_eq!(receiver.port, 5002);
        assert!(receiver.running);
        assert_eq!(cache.gateway_receivers(), vec![receiver]);
    }

    #[test]
    fn exhausted_port_range_fails_without_state() {
        let cache = InMemoryCache::new("server-1").with_bound_ports([5000]);
        let error = cache.create_gateway_receiver(settings(5000, 5000)).unwrap_err();
        assert!(matches!(error, RuntimeError::NoFreePort { .. }));
        assert!(cache.gateway_receivers().is_empty());
    }

    #[test]
    fn only_one_receiver_per_member() {
        let cache = InMemoryCache::new("server-1");
        cache.create_gateway_receiver(settings(5000, 5005)).unwrap();
        assert!(matches!(
            cache.create_gateway_receiver(settings(5000, 5005)),
            Err(RuntimeError::GatewayReceiverExists { port: 5000 })
        ));
    }
}

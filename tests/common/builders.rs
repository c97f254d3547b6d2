//! In-process cluster fixture: servers with in-memory caches reachable through
//! a `LocalTransport`, a static membership list and a call-counting
//! persistence backend.

#![allow(dead_code)]

use super::doubles::CountingPersistence;
use cluster_config::config::ManagementConfig;
use cluster_config::invocation::{LocalTransport, MemberTransport};
use cluster_config::management::ManagementService;
use cluster_config::membership::{MemberInfo, StaticMembership};
use cluster_config::model::MemberRef;
use cluster_config::realization::{CacheElementFunction, CacheRuntime, InMemoryCache};
use cluster_config::registry::ElementRegistry;
use std::collections::HashMap;
use std::sync::Arc;

pub struct TestCluster {
    pub config: ManagementConfig,
    pub registry: Arc<ElementRegistry>,
    pub membership: Arc<StaticMembership>,
    pub transport: Arc<LocalTransport>,
    pub persistence: Arc<CountingPersistence>,
    caches: HashMap<String, Arc<InMemoryCache>>,
}

impl Default for TestCluster {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCluster {
    pub fn new() -> Self {
        let mut config = ManagementConfig::default();
        config.invocation.member_timeout_ms = 1_000;
        Self {
            config,
            registry: Arc::new(ElementRegistry::with_default_elements()),
            membership: Arc::new(StaticMembership::new()),
            transport: Arc::new(LocalTransport::new()),
            persistence: Arc::new(CountingPersistence::new()),
            caches: HashMap::new(),
        }
    }

    /// A cluster of servers in the default group only.
    pub fn with_servers(names: &[&str]) -> Self {
        names
            .iter()
            .fold(Self::new(), |cluster, name| cluster.server(name, &[]))
    }

    pub fn server(mut self, name: &str, groups: &[&str]) -> Self {
        let cache = Arc::new(InMemoryCache::new(name));
        self.caches.insert(name.to_string(), Arc::clone(&cache));
        self.member(name, groups, cache)
    }

    /// Join a server backed by a custom runtime.
    pub fn member(self, name: &str, groups: &[&str], runtime: Arc<dyn CacheRuntime>) -> Self {
        let info = groups
            .iter()
            .fold(MemberInfo::server(name), |info, group| info.in_group(*group));
        self.membership.join(info);
        self.transport.register(runtime, self.function());
        self
    }

    pub fn locator(self, name: &str) -> Self {
        self.membership.join(MemberInfo::locator(name));
        self
    }

    pub fn without_persistence(mut self) -> Self {
        self.config.persistence.enabled = false;
        self
    }

    pub fn member_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.invocation.member_timeout_ms = timeout_ms;
        self
    }

    pub fn function(&self) -> CacheElementFunction {
        CacheElementFunction::new(Arc::clone(&self.registry))
    }

    pub fn cache(&self, name: &str) -> Arc<InMemoryCache> {
        Arc::clone(&self.caches[name])
    }

    /// Make a member unreachable while it stays in the membership list.
    pub fn crash(&self, name: &str) {
        self.transport.remove(&MemberRef::new(name));
    }

    pub fn service(&self) -> ManagementService {
        self.service_with_transport(self.transport.clone())
    }

    pub fn service_with_transport(&self, transport: Arc<dyn MemberTransport>) -> ManagementService {
        ManagementService::builder(self.config.clone())
            .with_registry(Arc::clone(&self.registry))
            .with_membership(self.membership.clone())
            .with_transport(transport)
            .with_persistence(self.persistence.clone())
            .build()
            .expect("test cluster configuration is valid")
    }
}

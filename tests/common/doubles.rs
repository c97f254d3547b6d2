//! Test doubles for the management service's collaborators.

#![allow(dead_code)]

use async_trait::async_trait;
use cluster_config::errors::PersistenceError;
use cluster_config::invocation::{LocalTransport, MemberTransport, TransportError};
use cluster_config::model::{ConfigurationDocument, MemberRef, RealizationResult};
use cluster_config::persistence::{
    ConfigurationPersistenceService, DocumentTransform, InMemoryPersistenceService, UpdateOutcome,
};
use cluster_config::realization::{
    CacheRuntime, GatewayReceiverSettings, InMemoryCache, LiveGatewayReceiver, LiveRegion,
    RealizationRequest, RuntimeError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory persistence that counts calls and can be told to misbehave.
#[derive(Debug, Default)]
pub struct CountingPersistence {
    inner: InMemoryPersistenceService,
    reads: AtomicUsize,
    updates: AtomicUsize,
    fail_updates: AtomicBool,
    fail_reads: AtomicBool,
    stale_reads: AtomicBool,
}

impl CountingPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.reads() + self.updates()
    }

    /// Every `update_document` fails with an I/O error.
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    /// Every `get_document` fails with an I/O error.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// `get_document` returns an empty document, as if another writer
    /// committed between the pre-check and the persist step.
    pub fn stale_reads(&self) {
        self.stale_reads.store(true, Ordering::SeqCst);
    }

    /// Stored document, bypassing the counters and stale-read mode.
    pub async fn document(&self, group: &str) -> ConfigurationDocument {
        self.inner
            .get_document(group)
            .await
            .expect("in-memory reads do not fail")
    }

    pub async fn seed(&self, group: &str, transform: DocumentTransform) {
        self.inner
            .update_document(group, transform)
            .await
            .expect("in-memory writes do not fail");
    }
}

#[async_trait]
impl ConfigurationPersistenceService for CountingPersistence {
    async fn get_document(&self, group: &str) -> Result<ConfigurationDocument, PersistenceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io {
                group: group.to_string(),
                operation: "read".to_string(),
                reason: "device not ready".to_string(),
            });
        }
        if self.stale_reads.load(Ordering::SeqCst) {
            return Ok(ConfigurationDocument::new(group));
        }
        self.inner.get_document(group).await
    }

    async fn update_document(
        &self,
        group: &str,
        transform: DocumentTransform,
    ) -> Result<UpdateOutcome, PersistenceError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io {
                group: group.to_string(),
                operation: "write".to_string(),
                reason: "disk full".to_string(),
            });
        }
        self.inner.update_document(group, transform).await
    }
}

/// Runtime whose region factory panics, standing in for a member that throws
/// mid-realization.
#[derive(Debug)]
pub struct PanickingRuntime {
    cache: InMemoryCache,
}

impl PanickingRuntime {
    pub fn new(name: &str) -> Self {
        Self {
            cache: InMemoryCache::new(name),
        }
    }
}

impl CacheRuntime for PanickingRuntime {
    fn member_name(&self) -> &str {
        self.cache.member_name()
    }

    fn create_region(&self, region: LiveRegion) -> Result<(), RuntimeError> {
        panic!("region factory failed for {}", region.name);
    }

    fn region(&self, name: &str) -> Option<LiveRegion> {
        self.cache.region(name)
    }

    fn region_names(&self) -> Vec<String> {
        self.cache.region_names()
    }

    fn create_gateway_receiver(
        &self,
        settings: GatewayReceiverSettings,
    ) -> Result<LiveGatewayReceiver, RuntimeError> {
        self.cache.create_gateway_receiver(settings)
    }

    fn gateway_receivers(&self) -> Vec<LiveGatewayReceiver> {
        self.cache.gateway_receivers()
    }
}

/// Runtime that refuses every factory call.
#[derive(Debug)]
pub struct UnavailableRuntime {
    name: String,
}

impl UnavailableRuntime {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl CacheRuntime for UnavailableRuntime {
    fn member_name(&self) -> &str {
        &self.name
    }

    fn create_region(&self, _region: LiveRegion) -> Result<(), RuntimeError> {
        Err(RuntimeError::Unavailable("cache is closing".to_string()))
    }

    fn region(&self, _name: &str) -> Option<LiveRegion> {
        None
    }

    fn region_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn create_gateway_receiver(
        &self,
        _settings: GatewayReceiverSettings,
    ) -> Result<LiveGatewayReceiver, RuntimeError> {
        Err(RuntimeError::Unavailable("cache is closing".to_string()))
    }

    fn gateway_receivers(&self) -> Vec<LiveGatewayReceiver> {
        Vec::new()
    }
}

/// Wraps a transport and delays selected members before forwarding.
pub struct DelayingTransport {
    inner: Arc<LocalTransport>,
    delays: HashMap<String, Duration>,
}

impl DelayingTransport {
    pub fn new(inner: Arc<LocalTransport>) -> Self {
        Self {
            inner,
            delays: HashMap::new(),
        }
    }

    pub fn delay(mut self, member: &str, delay: Duration) -> Self {
        self.delays.insert(member.to_string(), delay);
        self
    }
}

#[async_trait]
impl MemberTransport for DelayingTransport {
    async fn execute(
        &self,
        member: &MemberRef,
        request: RealizationRequest,
    ) -> Result<RealizationResult, TransportError> {
        if let Some(delay) = self.delays.get(member.name()) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.execute(member, request).await
    }
}

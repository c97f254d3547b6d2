use super::{MemberTransport, TransportError};
use crate::model::{MemberRef, RealizationResult};
use crate::realization::{CacheElementFunction, CacheRuntime, RealizationRequest};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
struct LocalMember {
    runtime: Arc<dyn CacheRuntime>,
    function: CacheElementFunction,
}

/// Transport to members hosted in this process.
///
/// Removing a member makes it unreachable, which is how tests simulate a
/// member that crashed after being selected as a target.
#[derive(Clone, Default)]
pub struct LocalTransport {
    members: Arc<DashMap<MemberRef, LocalMember>>,
}

impl std::fmt::Debug for LocalTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalTransport")
            .field("members", &self.members.len())
            .finish()
    }
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        runtime: Arc<dyn CacheRuntime>,
        function: CacheElementFunction,
    ) -> MemberRef {
        let member = MemberRef::new(runtime.member_name());
        debug!(member = %member, "Registered local member");
        self.members
            .insert(member.clone(), LocalMember { runtime, function });
        member
    }

    pub fn remove(&self, member: &MemberRef) -> bool {
        self.members.remove(member).is_some()
    }

    pub fn runtime(&self, member: &MemberRef) -> Option<Arc<dyn CacheRuntime>> {
        self.members
            .get(member)
            .map(|entry| Arc::clone(&entry.runtime))
    }
}

#[async_trait]
impl MemberTransport for LocalTransport {
    async fn execute(
        &self,
        member: &MemberRef,
        request: RealizationRequest,
    ) -> Result<RealizationResult, TransportError> {
        let local = self
            .members
            .get(member)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TransportError::Unreachable {
                member: member.clone(),
            })?;

        Ok(local.function.execute(&request, local.runtime.as_ref()))
    }
}

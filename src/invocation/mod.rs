//! # Member Invocation
//!
//! [`MemberInvoker`] runs one [`RealizationRequest`] on every targeted member
//! concurrently and collects exactly one [`RealizationResult`] per member.
//! Each member call is a separate task with its own timeout, and all of them
//! are joined before the result map is returned. Unreachable members,
//! timeouts and panics all become failed results for the member concerned.
//!
//! The wire used to reach a member is a [`MemberTransport`]; [`LocalTransport`]
//! dispatches to in-process members.

mod local;

pub use local::LocalTransport;

use crate::errors::InvocationError;
use crate::logging::log_member_realization;
use crate::model::{MemberRef, RealizationResult};
use crate::realization::RealizationRequest;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Member {member} is unreachable")]
    Unreachable { member: MemberRef },
    #[error("Member {member} did not respond within {timeout_ms}ms")]
    Timeout { member: MemberRef, timeout_ms: u64 },
    #[error("Execution on member {member} failed: {reason}")]
    ExecutionFailed { member: MemberRef, reason: String },
}

/// Remote execution of a realization request on a single member.
#[async_trait]
pub trait MemberTransport: Send + Sync {
    async fn execute(
        &self,
        member: &MemberRef,
        request: RealizationRequest,
    ) -> Result<RealizationResult, TransportError>;
}

#[derive(Clone)]
pub struct MemberInvoker {
    transport: Arc<dyn MemberTransport>,
    member_timeout: Duration,
}

impl std::fmt::Debug for MemberInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberInvoker")
            .field("member_timeout", &self.member_timeout)
            .finish()
    }
}

impl MemberInvoker {
    pub fn new(transport: Arc<dyn MemberTransport>, member_timeout: Duration) -> Self {
        Self {
            transport,
            member_timeout,
        }
    }

    pub fn member_timeout(&self) -> Duration {
        self.member_timeout
    }

    /// Fails only when `members` is empty; every other problem is reported
    /// per member in the returned map.
    pub async fn invoke_on_all(
        &self,
        request: RealizationRequest,
        members: &BTreeSet<MemberRef>,
    ) -> Result<HashMap<MemberRef, RealizationResult>, InvocationError> {
        if members.is_empty() {
            return Err(InvocationError::NoTargetMembers {
                operation: request.operation,
                element: request.element.id(),
            });
        }

        let correlation_id = request.correlation_id;
        let element = request.element.id();
        let timeout = self.member_timeout;
        let timeout_ms = saturating_millis(timeout);

        let (targets, handles): (Vec<_>, Vec<_>) = members
            .iter()
            .map(|member| {
                let transport = Arc::clone(&self.transport);
                let request = request.clone();
                let target = member.clone();
                let handle = tokio::spawn(async move {
                    match tokio::time::timeout(timeout, transport.execute(&target, request)).await
                    {
                        Ok(Ok(result)) => result,
                        Ok(Err(error)) => RealizationResult::failure(error.to_string()),
                        Err(_) => RealizationResult::failure(
                            TransportError::Timeout {
                                member: target.clone(),
                                timeout_ms,
                            }
                            .to_string(),
                        ),
                    }
                });
                (member.clone(), handle)
            })
            .unzip();

        let outcomes = join_all(handles).await;

        Ok(targets
            .into_iter()
            .zip(outcomes)
            .map(|(member, outcome)| {
                let result = outcome.unwrap_or_else(|join_error| {
                    RealizationResult::failure(format!(
                        "Invocation on member {member} aborted: {join_error}"
                    ))
                });
                log_member_realization(
                    correlation_id,
                    &member,
                    &element,
                    result.success,
                    &result.message,
                );
                (member, result)
            })
            .collect())
    }
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CacheElementOperation, RegionConfig};

    struct ScriptedTransport;

    #[async_trait]
    impl MemberTransport for ScriptedTransport {
        async fn execute(
            &self,
            member: &MemberRef,
            _request: RealizationRequest,
        ) -> Result<RealizationResult, TransportError> {
            match member.name() {
                "down" => Err(TransportError::Unreachable {
                    member: member.clone(),
                }),
                "slow" => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(RealizationResult::success("late"))
                }
                "broken" => panic!("member crashed"),
                _ => Ok(RealizationResult::success(format!("applied on {member}"))),
            }
        }
    }

    fn request() -> RealizationRequest {
        RealizationRequest::new(
            CacheElementOperation::Add,
            RegionConfig::named("customers").into(),
        )
    }

    fn members(names: &[&str]) -> BTreeSet<MemberRef> {
        names.iter().map(|name| MemberRef::new(*name)).collect()
    }

    #[tokio::test]
    async fn empty_member_set_is_rejected() {
        let invoker = MemberInvoker::new(Arc::new(ScriptedTransport), Duration::from_millis(100));
        let error = invoker
            .invoke_on_all(request(), &BTreeSet::new())
            .await
            .unwrap_err();
        assert!(matches!(error, InvocationError::NoTargetMembers { .. }));
    }

    #[tokio::test]
    async fn every_member_gets_exactly_one_result() {
        let invoker = MemberInvoker::new(Arc::new(ScriptedTransport), Duration::from_millis(200));
        let results = invoker
            .invoke_on_all(request(), &members(&["a", "down", "slow", "broken", "b"]))
            .await
            .unwrap();

        assert_eq!(results.len(), 5);
        assert!(results[&MemberRef::new("a")].success);
        assert!(results[&MemberRef::new("b")].success);

        let down = &results[&MemberRef::new("down")];
        assert!(!down.success);
        assert!(down.message.contains("unreachable"));

        let slow = &results[&MemberRef::new("slow")];
        assert!(!slow.success);
        assert!(slow.message.contains("200ms"));

        assert!(!results[&MemberRef::new("broken")].success);
    }

    #[test]
    fn reported_timeout_saturates_instead_of_wrapping() {
        assert_eq!(saturating_millis(Duration::from_millis(1_500)), 1_500);
        assert_eq!(saturating_millis(Duration::MAX), u64::MAX);
    }
}

//! Composite outcome of a management request.

use super::member::MemberRef;
use super::status::{Status, StatusResult};
use crate::constants::{STATUS_APPLIED_MESSAGE, STATUS_FAILED_MESSAGE};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Per-member statuses plus the persistence status of one request.
///
/// The overall verdict is never stored; [`status`](Self::status) derives it.
/// Serialization includes the derived `status` so callers see the verdict in
/// the response body; deserialization ignores it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterManagementResult {
    #[serde(default)]
    member_statuses: HashMap<MemberRef, Status>,
    #[serde(default = "Status::not_applicable")]
    persistence_status: Status,
}

impl Default for ClusterManagementResult {
    fn default() -> Self {
        Self {
            member_statuses: HashMap::new(),
            persistence_status: Status::not_applicable(),
        }
    }
}

impl ClusterManagementResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member_status(&mut self, member: impl Into<MemberRef>, status: Status) {
        self.member_statuses.insert(member.into(), status);
    }

    pub fn set_persistence_status(&mut self, status: Status) {
        self.persistence_status = status;
    }

    pub fn member_statuses(&self) -> &HashMap<MemberRef, Status> {
        &self.member_statuses
    }

    pub fn member_status(&self, member: &str) -> Option<&Status> {
        self.member_statuses.get(&MemberRef::new(member))
    }

    pub fn persistence_status(&self) -> &Status {
        &self.persistence_status
    }

    /// Members whose realization did not succeed.
    pub fn failed_members(&self) -> Vec<&MemberRef> {
        let mut failed: Vec<&MemberRef> = self
            .member_statuses
            .iter()
            .filter(|(_, status)| !status.is_success())
            .map(|(member, _)| member)
            .collect();
        failed.sort();
        failed
    }

    fn applied_on_all_members(&self) -> bool {
        !self.member_statuses.is_empty() && self.member_statuses.values().all(Status::is_success)
    }

    fn persisted_or_not_applicable(&self) -> bool {
        matches!(
            self.persistence_status.result,
            StatusResult::Success | StatusResult::NotApplicable
        )
    }

    /// SUCCESS iff every targeted member succeeded (and there was at least one)
    /// and persistence either succeeded or does not apply.
    pub fn status(&self) -> Status {
        if self.persisted_or_not_applicable() && self.applied_on_all_members() {
            Status::success(STATUS_APPLIED_MESSAGE)
        } else {
            Status::failure(STATUS_FAILED_MESSAGE)
        }
    }

    pub fn is_successful(&self) -> bool {
        self.status().is_success()
    }
}

impl Serialize for ClusterManagementResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ClusterManagementResult", 3)?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("memberStatuses", &self.member_statuses)?;
        state.serialize_field("persistenceStatus", &self.persistence_status)?;
        state.end()
    }
}

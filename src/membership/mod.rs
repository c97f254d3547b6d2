//! # Cluster Membership
//!
//! Resolves which live members a request targets. The default group
//! addresses every server; any other group addresses only its own members,
//! and an optional member filter narrows the set further. Locators never host
//! cache elements and are never targeted.

use crate::constants::DEFAULT_CLUSTER_GROUP;
use crate::model::MemberRef;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Server,
    Locator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub member: MemberRef,
    pub groups: BTreeSet<String>,
    pub kind: MemberKind,
}

impl MemberInfo {
    pub fn server(name: impl Into<String>) -> Self {
        Self {
            member: MemberRef::new(name),
            groups: BTreeSet::new(),
            kind: MemberKind::Server,
        }
    }

    pub fn locator(name: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Locator,
            ..Self::server(name)
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }

    pub fn belongs_to(&self, group: &str) -> bool {
        group == DEFAULT_CLUSTER_GROUP || self.groups.contains(group)
    }
}

/// Where a request applies: which group's document, and which members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetScope {
    /// `None` means the configured default group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl TargetScope {
    pub fn cluster() -> Self {
        Self {
            group: None,
            members: Vec::new(),
        }
    }

    pub fn group(group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            members: Vec::new(),
        }
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    /// Group name, falling back to `default_group`.
    pub fn group_or<'a>(&'a self, default_group: &'a str) -> &'a str {
        self.group
            .as_deref()
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .unwrap_or(default_group)
    }
}

impl Default for TargetScope {
    fn default() -> Self {
        Self::cluster()
    }
}

/// View of the cluster's currently live members.
pub trait ClusterMembership: Send + Sync {
    fn live_members(&self) -> Vec<MemberInfo>;

    /// Servers in any of `groups` (all servers for the default group),
    /// narrowed to `members` when that filter is non-empty.
    fn find_members(&self, groups: &[&str], members: &[String]) -> BTreeSet<MemberRef> {
        self.live_members()
            .into_iter()
            .filter(|info| info.kind == MemberKind::Server)
            .filter(|info| groups.is_empty() || groups.iter().any(|group| info.belongs_to(group)))
            .filter(|info| members.is_empty() || members.iter().any(|m| m == info.member.name()))
            .map(|info| info.member)
            .collect()
    }
}

/// Membership list maintained explicitly through join/leave.
#[derive(Debug, Default)]
pub struct StaticMembership {
    members: RwLock<HashMap<MemberRef, MemberInfo>>,
}

impl StaticMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(members: impl IntoIterator<Item = MemberInfo>) -> Self {
        let membership = Self::new();
        for member in members {
            membership.join(member);
        }
        membership
    }

    pub fn join(&self, info: MemberInfo) {
        info!(member = %info.member, groups = ?info.groups, kind = ?info.kind, "Member joined");
        self.members.write().insert(info.member.clone(), info);
    }

    pub fn leave(&self, member: &MemberRef) -> Option<MemberInfo> {
        let removed = self.members.write().remove(member);
        if removed.is_some() {
            info!(member = %member, "Member left");
        } else {
            debug!(member = %member, "Leave requested for unknown member");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }
}

impl ClusterMembership for StaticMembership {
    fn live_members(&self) -> Vec<MemberInfo> {
        self.members.read().values().cloned().collect()
    }
}

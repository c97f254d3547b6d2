//! The group-scoped persisted configuration document.

use super::element::{ConfigurationElement, ElementId, ElementType};
use super::gateway_receiver::GatewayReceiverConfig;
use super::region::RegionConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical configuration for one group.
///
/// Holds at most one element per (type, name). Only the mutators change the
/// element collections and only the persistence service bumps `version`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDocument {
    pub group: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_receiver: Option<GatewayReceiverConfig>,
}

impl ConfigurationDocument {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Default::default()
        }
    }

    pub fn find_region(&self, name: &str) -> Option<&RegionConfig> {
        self.regions.iter().find(|region| region.name == name)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        match id.element_type {
            ElementType::Region => self.find_region(&id.name).is_some(),
            ElementType::GatewayReceiver => self.gateway_receiver.is_some(),
        }
    }

    pub fn element_ids(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self
            .regions
            .iter()
            .map(|region| ElementId::region(region.name.clone()))
            .collect();
        if self.gateway_receiver.is_some() {
            ids.push(ElementId::gateway_receiver());
        }
        ids
    }

    /// Every persisted element, e.g. for replaying onto a member that joins later.
    pub fn elements(&self) -> Vec<ConfigurationElement> {
        let mut elements: Vec<ConfigurationElement> = self
            .regions
            .iter()
            .cloned()
            .map(ConfigurationElement::Region)
            .collect();
        if let Some(receiver) = &self.gateway_receiver {
            elements.push(ConfigurationElement::GatewayReceiver(receiver.clone()));
        }
        elements
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && self.gateway_receiver.is_none()
    }
}

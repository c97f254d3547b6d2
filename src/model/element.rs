//! Configuration elements and their identities.

use super::gateway_receiver::GatewayReceiverConfig;
use super::region::RegionConfig;
use crate::constants::GATEWAY_RECEIVER_ID;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type tag used to select validators, mutators and realizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    Region,
    GatewayReceiver,
}

impl ElementType {
    pub const ALL: [ElementType; 2] = [ElementType::Region, ElementType::GatewayReceiver];

    pub const fn tag(&self) -> &'static str {
        match self {
            ElementType::Region => "region",
            ElementType::GatewayReceiver => "gateway-receiver",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Identity of an element: unique per (type, name) within a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementId {
    pub element_type: ElementType,
    pub name: String,
}

impl ElementId {
    pub fn new(element_type: ElementType, name: impl Into<String>) -> Self {
        Self {
            element_type,
            name: name.into(),
        }
    }

    pub fn region(name: impl Into<String>) -> Self {
        Self::new(ElementType::Region, name)
    }

    pub fn gateway_receiver() -> Self {
        Self::new(ElementType::GatewayReceiver, GATEWAY_RECEIVER_ID)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.element_type, self.name)
    }
}

/// A typed description of something that should exist on every member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "elementType", rename_all = "kebab-case")]
pub enum ConfigurationElement {
    Region(RegionConfig),
    GatewayReceiver(GatewayReceiverConfig),
}

impl ConfigurationElement {
    pub fn element_type(&self) -> ElementType {
        match self {
            ConfigurationElement::Region(_) => ElementType::Region,
            ConfigurationElement::GatewayReceiver(_) => ElementType::GatewayReceiver,
        }
    }

    pub fn id(&self) -> ElementId {
        match self {
            ConfigurationElement::Region(region) => ElementId::region(region.name.clone()),
            ConfigurationElement::GatewayReceiver(_) => ElementId::gateway_receiver(),
        }
    }
}

impl From<RegionConfig> for ConfigurationElement {
    fn from(config: RegionConfig) -> Self {
        ConfigurationElement::Region(config)
    }
}

impl From<GatewayReceiverConfig> for ConfigurationElement {
    fn from(config: GatewayReceiverConfig) -> Self {
        ConfigurationElement::GatewayReceiver(config)
    }
}

/// Operation a member is asked to perform for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheElementOperation {
    Add,
    Update,
    Delete,
}

impl fmt::Display for CacheElementOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CacheElementOperation::Add => "add",
            CacheElementOperation::Update => "update",
            CacheElementOperation::Delete => "delete",
        };
        f.write_str(label)
    }
}

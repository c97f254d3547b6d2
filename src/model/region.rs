//! Region element: a named cache region and its attributes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region descriptor as received from the request-reception layer.
///
/// `type` is kept as raw text so the validator, not the deserializer, decides
/// whether it names a known region type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionConfig {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub region_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<RegionAttributes>,
}

impl RegionConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, region_type: impl Into<String>) -> Self {
        self.region_type = Some(region_type.into());
        self
    }

    pub fn with_attributes(mut self, attributes: RegionAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Parsed region type, if one is set and recognised.
    pub fn parsed_type(&self) -> Option<RegionType> {
        self.region_type.as_deref().and_then(|t| t.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_policy: Option<DataPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redundant_copies: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eviction: Option<EvictionAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvictionAttributes {
    pub action: EvictionAction,
    pub maximum_entries: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvictionAction {
    LocalDestroy,
    OverflowToDisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataPolicy {
    Normal,
    Partition,
    PersistentPartition,
    Replicate,
    PersistentReplicate,
}

impl fmt::Display for DataPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DataPolicy::Normal => "NORMAL",
            DataPolicy::Partition => "PARTITION",
            DataPolicy::PersistentPartition => "PERSISTENT_PARTITION",
            DataPolicy::Replicate => "REPLICATE",
            DataPolicy::PersistentReplicate => "PERSISTENT_REPLICATE",
        };
        f.write_str(label)
    }
}

/// Region shortcuts accepted in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionType {
    Partition,
    PartitionRedundant,
    PartitionPersistent,
    PartitionRedundantPersistent,
    Replicate,
    ReplicatePersistent,
    Local,
}

impl RegionType {
    pub const ALL: [RegionType; 7] = [
        RegionType::Partition,
        RegionType::PartitionRedundant,
        RegionType::PartitionPersistent,
        RegionType::PartitionRedundantPersistent,
        RegionType::Replicate,
        RegionType::ReplicatePersistent,
        RegionType::Local,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            RegionType::Partition => "PARTITION",
            RegionType::PartitionRedundant => "PARTITION_REDUNDANT",
            RegionType::PartitionPersistent => "PARTITION_PERSISTENT",
            RegionType::PartitionRedundantPersistent => "PARTITION_REDUNDANT_PERSISTENT",
            RegionType::Replicate => "REPLICATE",
            RegionType::ReplicatePersistent => "REPLICATE_PERSISTENT",
            RegionType::Local => "LOCAL",
        }
    }

    pub const fn data_policy(&self) -> DataPolicy {
        match self {
            RegionType::Partition | RegionType::PartitionRedundant => DataPolicy::Partition,
            RegionType::PartitionPersistent | RegionType::PartitionRedundantPersistent => {
                DataPolicy::PersistentPartition
            }
            RegionType::Replicate => DataPolicy::Replicate,
            RegionType::ReplicatePersistent => DataPolicy::PersistentReplicate,
            RegionType::Local => DataPolicy::Normal,
        }
    }

    pub const fn is_partitioned(&self) -> bool {
        matches!(self.data_policy(), DataPolicy::Partition | DataPolicy::PersistentPartition)
    }

    pub const fn is_redundant(&self) -> bool {
        matches!(
            self,
            RegionType::PartitionRedundant | RegionType::PartitionRedundantPersistent
        )
    }

    /// Redundant copies implied by the shortcut; `None` for non-partitioned types.
    pub const fn default_redundant_copies(&self) -> Option<u32> {
        if self.is_redundant() {
            Some(1)
        } else if self.is_partitioned() {
            Some(0)
        } else {
            None
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        if normalized == "PARTITIONED" {
            return Ok(RegionType::Partition);
        }
        RegionType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("unknown region type '{value}'"))
    }
}

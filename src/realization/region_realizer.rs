use super::runtime::{CacheRuntime, LiveRegion};
use super::{wrong_element_type, ConfigurationRealizer};
use crate::model::{
    ConfigurationElement, ElementId, ElementType, RealizationResult, RegionAttributes,
    RegionConfig, RegionType,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RegionRealizer;

impl RegionRealizer {
    fn live_region(config: &RegionConfig) -> LiveRegion {
        let region_type = config.parsed_type().unwrap_or(RegionType::Partition);
        let attributes = config.attributes.clone().unwrap_or_default();
        LiveRegion {
            name: config.name.clone(),
            region_type,
            data_policy: attributes
                .data_policy
                .unwrap_or_else(|| region_type.data_policy()),
            redundant_copies: attributes
                .redundant_copies
                .or_else(|| region_type.default_redundant_copies()),
            eviction: attributes.eviction,
            statistics_enabled: attributes.statistics_enabled.unwrap_or(false),
        }
    }

    fn config_of(region: LiveRegion) -> RegionConfig {
        RegionConfig::named(region.name)
            .with_type(region.region_type.as_str())
            .with_attributes(RegionAttributes {
                data_policy: Some(region.data_policy),
                redundant_copies: region.redundant_copies,
                eviction: region.eviction,
                statistics_enabled: Some(region.statistics_enabled),
            })
    }
}

impl ConfigurationRealizer for RegionRealizer {
    fn element_type(&self) -> ElementType {
        ElementType::Region
    }

    fn create(
        &self,
        element: &ConfigurationElement,
        runtime: &dyn CacheRuntime,
    ) -> RealizationResult {
        let config = match element {
            ConfigurationElement::Region(config) => config,
            other => return wrong_element_type(ElementType::Region, other.element_type()),
        };

        let region = Self::live_region(config);
        let region_type = region.region_type;
        match runtime.create_region(region) {
            Ok(()) => RealizationResult::success(format!(
                "Region {} created on {} with type {}",
                config.name,
                runtime.member_name(),
                region_type
            )),
            Err(error) => RealizationResult::failure(error.to_string()),
        }
    }

    fn exists(&self, id: &ElementId, runtime: &dyn CacheRuntime) -> bool {
        id.element_type == ElementType::Region && runtime.region(&id.name).is_some()
    }

    fn get(&self, id: &ElementId, runtime: &dyn CacheRuntime) -> Option<ConfigurationElement> {
        if id.element_type != ElementType::Region {
            return None;
        }
        runtime
            .region(&id.name)
            .map(|region| ConfigurationElement::Region(Self::config_of(region)))
    }
}

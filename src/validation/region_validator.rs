use super::{ConfigurationValidator, ValidatedElement};
use crate::constants::region::{MAX_REDUNDANT_COPIES, NAME_SEPARATOR, RESERVED_NAME_PREFIX};
use crate::errors::ValidationError;
use crate::model::{ConfigurationElement, ElementType, RegionAttributes, RegionType};

/// Defaults an unset region type to `PARTITION` and derives the data policy
/// and redundancy from the type.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionConfigValidator;

impl ConfigurationValidator for RegionConfigValidator {
    fn element_type(&self) -> ElementType {
        ElementType::Region
    }

    fn set_defaults_and_validate(
        &self,
        element: ConfigurationElement,
    ) -> Result<ValidatedElement, ValidationError> {
        let mut config = match element {
            ConfigurationElement::Region(config) => config,
            other => {
                return Err(ValidationError::ElementTypeMismatch {
                    expected: ElementType::Region,
                    actual: other.element_type(),
                })
            }
        };

        config.name = validate_name(&config.name)?;

        let region_type = match config.region_type.as_deref() {
            None => RegionType::Partition,
            Some(raw) => raw.parse::<RegionType>().map_err(|reason| {
                ValidationError::invalid_value(
                    "type",
                    raw,
                    format!(
                        "{reason}; expected one of {}",
                        RegionType::ALL.map(|t| t.as_str()).join(", ")
                    ),
                )
            })?,
        };
        config.region_type = Some(region_type.as_str().to_string());

        let attributes = config.attributes.take().unwrap_or_default();
        config.attributes = Some(apply_attribute_defaults(region_type, attributes)?);

        Ok(ValidatedElement::new(ConfigurationElement::Region(config)))
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField {
            element_type: ElementType::Region,
            field: "name".to_string(),
        });
    }
    if name.contains(NAME_SEPARATOR) {
        return Err(ValidationError::invalid_value(
            "name",
            name,
            format!("region names must not contain '{NAME_SEPARATOR}'"),
        ));
    }
    if name.starts_with(RESERVED_NAME_PREFIX) {
        return Err(ValidationError::invalid_value(
            "name",
            name,
            format!("names starting with '{RESERVED_NAME_PREFIX}' are reserved for internal use"),
        ));
    }
    Ok(name.to_string())
}

fn apply_attribute_defaults(
    region_type: RegionType,
    mut attributes: RegionAttributes,
) -> Result<RegionAttributes, ValidationError> {
    let implied_policy = region_type.data_policy();
    match attributes.data_policy {
        Some(policy) if policy != implied_policy => {
            return Err(ValidationError::Contradiction(format!(
                "region type {region_type} implies data policy {implied_policy}, but {policy} was requested"
            )));
        }
        _ => attributes.data_policy = Some(implied_policy),
    }

    attributes.redundant_copies = match (attributes.redundant_copies, region_type.is_partitioned()) {
        (Some(copies), false) => {
            return Err(ValidationError::Contradiction(format!(
                "redundant copies ({copies}) can only be set on partitioned regions, not {region_type}"
            )));
        }
        (Some(copies), true) if copies > MAX_REDUNDANT_COPIES => {
            return Err(ValidationError::invalid_value(
                "attributes.redundantCopies",
                copies,
                format!("at most {MAX_REDUNDANT_COPIES} redundant copies are supported"),
            ));
        }
        (Some(0), true) if region_type.is_redundant() => {
            return Err(ValidationError::Contradiction(format!(
                "region type {region_type} requires at least one redundant copy"
            )));
        }
        (Some(copies), true) => Some(copies),
        (None, _) => region_type.default_redundant_copies(),
    };

    if let Some(eviction) = &attributes.eviction {
        if eviction.maximum_entries == 0 {
            return Err(ValidationError::invalid_value(
                "attributes.eviction.maximumEntries",
                eviction.maximum_entries,
                "eviction requires a positive entry limit",
            ));
        }
    }

    attributes.statistics_enabled = Some(attributes.statistics_enabled.unwrap_or(false));

    Ok(attributes)
}

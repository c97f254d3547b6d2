use super::ConfigurationMutator;
use crate::errors::MutationError;
use crate::model::{ConfigurationDocument, ConfigurationElement, ElementType, RegionConfig};

/// Maintains the document's region list; identity is the region name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionConfigMutator;

impl RegionConfigMutator {
    fn region(element: ConfigurationElement) -> Result<RegionConfig, MutationError> {
        match element {
            ConfigurationElement::Region(region) => Ok(region),
            other => Err(MutationError::ElementTypeMismatch {
                expected: ElementType::Region,
                actual: other.element_type(),
            }),
        }
    }

    fn position(document: &ConfigurationDocument, name: &str) -> Option<usize> {
        document.regions.iter().position(|region| region.name == name)
    }
}

impl ConfigurationMutator for RegionConfigMutator {
    fn element_type(&self) -> ElementType {
        ElementType::Region
    }

    fn exists(&self, element: &ConfigurationElement, document: &ConfigurationDocument) -> bool {
        match element {
            ConfigurationElement::Region(region) => document.find_region(&region.name).is_some(),
            _ => false,
        }
    }

    fn add(
        &self,
        element: ConfigurationElement,
        mut document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError> {
        let id = element.id();
        let region = Self::region(element)?;
        if Self::position(&document, &region.name).is_some() {
            return Err(MutationError::AlreadyExists(id));
        }
        document.regions.push(region);
        Ok(document)
    }

    fn update(
        &self,
        element: ConfigurationElement,
        mut document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError> {
        let id = element.id();
        let region = Self::region(element)?;
        let index = Self::position(&document, &region.name).ok_or(MutationError::NotFound(id))?;
        document.regions[index] = region;
        Ok(document)
    }

    fn delete(
        &self,
        element: ConfigurationElement,
        mut document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError> {
        let id = element.id();
        let region = Self::region(element)?;
        let index = Self::position(&document, &region.name).ok_or(MutationError::NotFound(id))?;
        document.regions.remove(index);
        Ok(document)
    }
}

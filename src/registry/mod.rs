//! # Element Registry
//!
//! Maps each [`ElementType`] to its validator, mutator and realizer. The
//! registry is assembled once at startup and shared immutably afterwards, so
//! the management service never branches on concrete element types.
//!
//! ## Usage
//!
//! ```rust
//! use cluster_config::model::ElementType;
//! use cluster_config::registry::ElementRegistry;
//!
//! let registry = ElementRegistry::with_default_elements();
//! assert!(registry.supports(ElementType::Region));
//!
//! let stats = registry.stats();
//! assert_eq!(stats.total_element_types, 2);
//! ```

use crate::errors::RegistryError;
use crate::model::ElementType;
use crate::mutation::{ConfigurationMutator, GatewayReceiverConfigMutator, RegionConfigMutator};
use crate::realization::{ConfigurationRealizer, GatewayReceiverRealizer, RegionRealizer};
use crate::validation::{
    ConfigurationValidator, GatewayReceiverConfigValidator, RegionConfigValidator,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// The three per-type components for one element type.
#[derive(Clone)]
pub struct ElementHandlers {
    pub validator: Arc<dyn ConfigurationValidator>,
    pub mutator: Arc<dyn ConfigurationMutator>,
    pub realizer: Arc<dyn ConfigurationRealizer>,
}

impl ElementHandlers {
    pub fn new(
        validator: Arc<dyn ConfigurationValidator>,
        mutator: Arc<dyn ConfigurationMutator>,
        realizer: Arc<dyn ConfigurationRealizer>,
    ) -> Self {
        Self {
            validator,
            mutator,
            realizer,
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.validator.element_type()
    }

    fn check_consistency(&self) -> Result<(), RegistryError> {
        let expected = self.element_type();
        let components = [
            ("mutator", self.mutator.element_type()),
            ("realizer", self.realizer.element_type()),
        ];
        for (component, actual) in components {
            if actual != expected {
                return Err(RegistryError::InconsistentHandlers {
                    component: component.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ElementHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementHandlers")
            .field("element_type", &self.element_type())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_element_types: usize,
    pub element_types: Vec<ElementType>,
}

#[derive(Debug, Default)]
pub struct ElementRegistry {
    handlers: HashMap<ElementType, ElementHandlers>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the region and gateway receiver element types.
    pub fn with_default_elements() -> Self {
        let mut handlers = HashMap::new();
        handlers.insert(
            ElementType::Region,
            ElementHandlers::new(
                Arc::new(RegionConfigValidator),
                Arc::new(RegionConfigMutator),
                Arc::new(RegionRealizer),
            ),
        );
        handlers.insert(
            ElementType::GatewayReceiver,
            ElementHandlers::new(
                Arc::new(GatewayReceiverConfigValidator),
                Arc::new(GatewayReceiverConfigMutator),
                Arc::new(GatewayReceiverRealizer),
            ),
        );
        Self { handlers }
    }

    pub fn register(&mut self, handlers: ElementHandlers) -> Result<(), RegistryError> {
        handlers.check_consistency()?;
        let element_type = handlers.element_type();
        if self.handlers.contains_key(&element_type) {
            return Err(RegistryError::DuplicateRegistration(element_type));
        }

        info!(element_type = %element_type, "Registered element handlers");
        self.handlers.insert(element_type, handlers);
        Ok(())
    }

    pub fn handlers(&self, element_type: ElementType) -> Result<&ElementHandlers, RegistryError> {
        self.handlers
            .get(&element_type)
            .ok_or(RegistryError::UnsupportedElementType(element_type))
    }

    pub fn validator(
        &self,
        element_type: ElementType,
    ) -> Result<&dyn ConfigurationValidator, RegistryError> {
        self.handlers(element_type).map(|h| h.validator.as_ref())
    }

    pub fn mutator(
        &self,
        element_type: ElementType,
    ) -> Result<Arc<dyn ConfigurationMutator>, RegistryError> {
        self.handlers(element_type).map(|h| Arc::clone(&h.mutator))
    }

    pub fn realizer(
        &self,
        element_type: ElementType,
    ) -> Result<&dyn ConfigurationRealizer, RegistryError> {
        self.handlers(element_type).map(|h| h.realizer.as_ref())
    }

    pub fn supports(&self, element_type: ElementType) -> bool {
        self.handlers.contains_key(&element_type)
    }

    pub fn element_types(&self) -> Vec<ElementType> {
        let mut types: Vec<ElementType> = self.handlers.keys().copied().collect();
        types.sort();
        types
    }

    pub fn stats(&self) -> RegistryStats {
        let element_types = self.element_types();
        RegistryStats {
            total_element_types: element_types.len(),
            element_types,
        }
    }
}

//! # Element Validation
//!
//! Validators fill in type-specific defaults and reject structurally invalid
//! input before anything else happens to a request. They are pure: no member
//! is contacted and nothing is persisted, whatever the outcome.
//!
//! ```rust
//! use cluster_config::model::{ConfigurationElement, RegionConfig};
//! use cluster_config::validation::{ConfigurationValidator, RegionConfigValidator};
//!
//! let validated = RegionConfigValidator
//!     .set_defaults_and_validate(RegionConfig::named("customers").into())
//!     .unwrap();
//!
//! match validated.element() {
//!     ConfigurationElement::Region(region) => {
//!         assert_eq!(region.region_type.as_deref(), Some("PARTITION"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

mod gateway_receiver_validator;
mod region_validator;

pub use gateway_receiver_validator::GatewayReceiverConfigValidator;
pub use region_validator::RegionConfigValidator;

use crate::errors::ValidationError;
use crate::model::{ConfigurationElement, ElementId, ElementType};

/// Per-element-type validation, selected through the element registry.
pub trait ConfigurationValidator: Send + Sync {
    fn element_type(&self) -> ElementType;

    /// Apply defaults and validate. Runs before the persisted document is read.
    fn set_defaults_and_validate(
        &self,
        element: ConfigurationElement,
    ) -> Result<ValidatedElement, ValidationError>;
}

/// An element that has passed its type's validator, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedElement(ConfigurationElement);

impl ValidatedElement {
    pub(crate) fn new(element: ConfigurationElement) -> Self {
        Self(element)
    }

    pub fn element(&self) -> &ConfigurationElement {
        &self.0
    }

    pub fn id(&self) -> ElementId {
        self.0.id()
    }

    pub fn element_type(&self) -> ElementType {
        self.0.element_type()
    }

    pub fn into_inner(self) -> ConfigurationElement {
        self.0
    }
}

impl AsRef<ConfigurationElement> for ValidatedElement {
    fn as_ref(&self) -> &ConfigurationElement {
        &self.0
    }
}

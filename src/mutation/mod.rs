//! # Document Mutation
//!
//! Mutators apply one element change to a group's [`ConfigurationDocument`].
//! They are pure transformations: they take the document by value and either
//! return the updated document or a [`MutationError`], never touching storage
//! or members. The persistence service decides whether the returned document
//! is committed.

mod gateway_receiver_mutator;
mod region_mutator;

pub use gateway_receiver_mutator::GatewayReceiverConfigMutator;
pub use region_mutator::RegionConfigMutator;

use crate::errors::MutationError;
use crate::model::{CacheElementOperation, ConfigurationDocument, ConfigurationElement, ElementType};

pub trait ConfigurationMutator: Send + Sync {
    fn element_type(&self) -> ElementType;

    /// Whether an element with the same identity is already in `document`.
    fn exists(&self, element: &ConfigurationElement, document: &ConfigurationDocument) -> bool;

    fn add(
        &self,
        element: ConfigurationElement,
        document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError>;

    fn update(
        &self,
        element: ConfigurationElement,
        document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError>;

    fn delete(
        &self,
        element: ConfigurationElement,
        document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError>;

    /// Dispatch on `operation`.
    fn apply(
        &self,
        operation: CacheElementOperation,
        element: ConfigurationElement,
        document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError> {
        match operation {
            CacheElementOperation::Add => self.add(element, document),
            CacheElementOperation::Update => self.update(element, document),
            CacheElementOperation::Delete => self.delete(element, document),
        }
    }
}

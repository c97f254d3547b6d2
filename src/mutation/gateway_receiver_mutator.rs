use super::ConfigurationMutator;
use crate::errors::MutationError;
use crate::model::{ConfigurationDocument, ConfigurationElement, ElementType, GatewayReceiverConfig};

/// A group holds at most one gateway receiver.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayReceiverConfigMutator;

fn receiver(element: ConfigurationElement) -> Result<GatewayReceiverConfig, MutationError> {
    match element {
        ConfigurationElement::GatewayReceiver(receiver) => Ok(receiver),
        other => Err(MutationError::ElementTypeMismatch {
            expected: ElementType::GatewayReceiver,
            actual: other.element_type(),
        }),
    }
}

impl ConfigurationMutator for GatewayReceiverConfigMutator {
    fn element_type(&self) -> ElementType {
        ElementType::GatewayReceiver
    }

    fn exists(&self, element: &ConfigurationElement, document: &ConfigurationDocument) -> bool {
        matches!(element, ConfigurationElement::GatewayReceiver(_))
            && document.gateway_receiver.is_some()
    }

    fn add(
        &self,
        element: ConfigurationElement,
        mut document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError> {
        let id = element.id();
        let receiver = receiver(element)?;
        if document.gateway_receiver.is_some() {
            return Err(MutationError::AlreadyExists(id));
        }
        document.gateway_receiver = Some(receiver);
        Ok(document)
    }

    fn update(
        &self,
        element: ConfigurationElement,
        mut document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError> {
        let id = element.id();
        let receiver = receiver(element)?;
        match document.gateway_receiver.as_mut() {
            Some(existing) => *existing = receiver,
            None => return Err(MutationError::NotFound(id)),
        }
        Ok(document)
    }

    fn delete(
        &self,
        element: ConfigurationElement,
        mut document: ConfigurationDocument,
    ) -> Result<ConfigurationDocument, MutationError> {
        let id = element.id();
        receiver(element)?;
        document
            .gateway_receiver
            .take()
            .ok_or(MutationError::NotFound(id))?;
        Ok(document)
    }
}

//! Member-side entry point for management requests.

use super::runtime::CacheRuntime;
use crate::model::{CacheElementOperation, ConfigurationElement, RealizationResult};
use crate::registry::ElementRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// What a member is asked to do. Serializable so transports can ship it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizationRequest {
    pub correlation_id: Uuid,
    pub operation: CacheElementOperation,
    pub element: ConfigurationElement,
}

impl RealizationRequest {
    pub fn new(operation: CacheElementOperation, element: ConfigurationElement) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            operation,
            element,
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }
}

/// Selects the realizer for the request's element type and runs the
/// requested operation against the member's runtime.
#[derive(Clone)]
pub struct CacheElementFunction {
    registry: Arc<ElementRegistry>,
}

impl std::fmt::Debug for CacheElementFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheElementFunction")
            .field("element_types", &self.registry.element_types())
            .finish()
    }
}

impl CacheElementFunction {
    pub fn new(registry: Arc<ElementRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(
        &self,
        request: &RealizationRequest,
        runtime: &dyn CacheRuntime,
    ) -> RealizationResult {
        let element = &request.element;
        let id = element.id();
        let realizer = match self.registry.realizer(element.element_type()) {
            Ok(realizer) => realizer,
            Err(error) => return RealizationResult::failure(error.to_string()),
        };

        debug!(
            correlation_id = %request.correlation_id,
            member = %runtime.member_name(),
            operation = %request.operation,
            element = %id,
            "Executing cache element function"
        );

        match request.operation {
            CacheElementOperation::Add => {
                if realizer.exists(&id, runtime) {
                    RealizationResult::success(format!(
                        "{id} already exists on member {}; skipped",
                        runtime.member_name()
                    ))
                } else {
                    realizer.create(element, runtime)
                }
            }
            CacheElementOperation::Update => realizer
                .update(element, runtime)
                .unwrap_or_else(|error| RealizationResult::failure(error.to_string())),
            CacheElementOperation::Delete => realizer
                .delete(&id, runtime)
                .unwrap_or_else(|error| RealizationResult::failure(error.to_string())),
        }
    }
}

//! # Configuration Persistence
//!
//! Holds the canonical configuration document of each group. Writers never
//! read-then-write: they hand [`ConfigurationPersistenceService::update_document`]
//! a transform, and the service applies it under a per-group lock so concurrent
//! requests on the same group serialize. A transform returning `None` aborts
//! the update and leaves the stored document untouched.

mod file;
mod memory;

pub use file::FilePersistenceService;
pub use memory::InMemoryPersistenceService;

use crate::config::{PersistenceBackend, PersistenceConfig};
use crate::errors::PersistenceError;
use crate::model::ConfigurationDocument;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Read-transform-write step applied to a group's current document.
pub type DocumentTransform =
    Box<dyn FnOnce(ConfigurationDocument) -> Option<ConfigurationDocument> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Committed { version: u64 },
    /// The transform returned `None`; nothing was written.
    Aborted,
}

#[async_trait]
pub trait ConfigurationPersistenceService: Send + Sync {
    /// Current document of `group`; an empty version-0 document if the group
    /// has never been written.
    async fn get_document(&self, group: &str) -> Result<ConfigurationDocument, PersistenceError>;

    async fn update_document(
        &self,
        group: &str,
        transform: DocumentTransform,
    ) -> Result<UpdateOutcome, PersistenceError>;
}

/// Backend selected by configuration.
pub fn persistence_from_config(
    config: &PersistenceConfig,
) -> Arc<dyn ConfigurationPersistenceService> {
    match config.backend {
        PersistenceBackend::Memory => Arc::new(InMemoryPersistenceService::new()),
        PersistenceBackend::File => Arc::new(FilePersistenceService::new(&config.directory)),
    }
}

/// Apply `transform` to `current`, stamping the committed copy.
pub(crate) fn apply_transform(
    group: &str,
    current: &ConfigurationDocument,
    transform: DocumentTransform,
) -> Option<ConfigurationDocument> {
    let mut next = transform(current.clone())?;
    next.group = group.to_string();
    next.version = current.version + 1;
    next.updated_at = Some(Utc::now());
    Some(next)
}

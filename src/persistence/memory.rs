use super::{apply_transform, ConfigurationPersistenceService, DocumentTransform, UpdateOutcome};
use crate::errors::PersistenceError;
use crate::model::ConfigurationDocument;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Process-local document store with one async lock per group.
#[derive(Debug, Default)]
pub struct InMemoryPersistenceService {
    documents: DashMap<String, Arc<Mutex<ConfigurationDocument>>>,
}

impl InMemoryPersistenceService {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, group: &str) -> Arc<Mutex<ConfigurationDocument>> {
        let entry = self
            .documents
            .entry(group.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ConfigurationDocument::new(group))));
        Arc::clone(entry.value())
    }

    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.documents.iter().map(|e| e.key().clone()).collect();
        groups.sort();
        groups
    }
}

#[async_trait]
impl ConfigurationPersistenceService for InMemoryPersistenceService {
    async fn get_document(&self, group: &str) -> Result<ConfigurationDocument, PersistenceError> {
        let slot = match self.documents.get(group) {
            Some(entry) => Arc::clone(entry.value()),
            None => return Ok(ConfigurationDocument::new(group)),
        };
        let document = slot.lock().await;
        Ok(document.clone())
    }

    async fn update_document(
        &self,
        group: &str,
        transform: DocumentTransform,
    ) -> Result<UpdateOutcome, PersistenceError> {
        let slot = self.slot(group);
        let mut current = slot.lock().await;

        match apply_transform(group, &current, transform) {
            Some(next) => {
                let version = next.version;
                *current = next;
                debug!(group = %group, version, "Committed configuration document");
                Ok(UpdateOutcome::Committed { version })
            }
            None => {
                debug!(group = %group, "Configuration update aborted by transform");
                Ok(UpdateOutcome::Aborted)
            }
        }
    }
}

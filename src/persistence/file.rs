use super::{apply_transform, ConfigurationPersistenceService, DocumentTransform, UpdateOutcome};
use crate::errors::PersistenceError;
use crate::model::ConfigurationDocument;
use async_trait::async_trait;
use dashmap::DashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// One JSON document per group under `directory`.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// document, so readers see either the old or the new version.
#[derive(Debug)]
pub struct FilePersistenceService {
    directory: PathBuf,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl FilePersistenceService {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            locks: DashMap::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn document_path(&self, group: &str) -> Result<PathBuf, PersistenceError> {
        validate_group(group)?;
        Ok(self.directory.join(format!("{group}.json")))
    }

    fn lock_for(&self, group: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.locks
                .entry(group.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }

    async fn read(&self, group: &str, path: &Path) -> Result<ConfigurationDocument, PersistenceError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                PersistenceError::Serialization {
                    group: group.to_string(),
                    reason: e.to_string(),
                }
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ConfigurationDocument::new(group)),
            Err(e) => Err(io_error(group, "read", e)),
        }
    }

    async fn write(
        &self,
        group: &str,
        path: &Path,
        document: &ConfigurationDocument,
    ) -> Result<(), PersistenceError> {
        let bytes =
            serde_json::to_vec_pretty(document).map_err(|e| PersistenceError::Serialization {
                group: group.to_string(),
                reason: e.to_string(),
            })?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| io_error(group, "create directory for", e))?;

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, bytes)
            .await
            .map_err(|e| io_error(group, "write", e))?;
        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                warn!(
                    group = %group,
                    path = %temp_path.display(),
                    error = %cleanup,
                    "Failed to remove temporary configuration file"
                );
            }
            return Err(io_error(group, "commit", e));
        }
        Ok(())
    }
}

fn io_error(group: &str, operation: &str, error: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        group: group.to_string(),
        operation: operation.to_string(),
        reason: error.to_string(),
    }
}

fn validate_group(group: &str) -> Result<(), PersistenceError> {
    let invalid = |reason: &str| PersistenceError::InvalidGroup {
        group: group.to_string(),
        reason: reason.to_string(),
    };

    if group.is_empty() {
        return Err(invalid("group name must not be empty"));
    }
    if group.starts_with('.') {
        return Err(invalid("group name must not start with '.'"));
    }
    if !group
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(invalid(
            "only ASCII letters, digits, '-', '_' and '.' are allowed",
        ));
    }
    Ok(())
}

#[async_trait]
impl ConfigurationPersistenceService for FilePersistenceService {
    async fn get_document(&self, group: &str) -> Result<ConfigurationDocument, PersistenceError> {
        let path = self.document_path(group)?;
        self.read(group, &path).await
    }

    async fn update_document(
        &self,
        group: &str,
        transform: DocumentTransform,
    ) -> Result<UpdateOutcome, PersistenceError> {
        let path = self.document_path(group)?;
        let lock = self.lock_for(group);
        let _guard = lock.lock().await;

        let current = self.read(group, &path).await?;
        let Some(next) = apply_transform(group, &current, transform) else {
            debug!(group = %group, "Configuration update aborted by transform");
            return Ok(UpdateOutcome::Aborted);
        };

        self.write(group, &path, &next).await?;
        info!(
            group = %group,
            version = next.version,
            path = %path.display(),
            "Committed configuration document"
        );
        Ok(UpdateOutcome::Committed {
            version: next.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GatewayReceiverConfig, RegionConfig};

    #[tokio::test]
    async fn failed_commit_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = FilePersistenceService::new(dir.path());

        // a non-empty directory where the document should be makes the rename fail
        let path = dir.path().join("east.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), b"x").unwrap();

        let error = service
            .write("east", &path, &ConfigurationDocument::new("east"))
            .await
            .unwrap_err();

        assert!(matches!(error, PersistenceError::Io { ref operation, .. } if operation == "commit"));
        assert!(!dir.path().join("east.json.tmp").exists());
        assert!(path.join("occupied").exists());
    }

    #[tokio::test]
    async fn documents_survive_a_new_service_instance() {
        let dir = tempfile::tempdir().unwrap();
        let service = FilePersistenceService::new(dir.path().join("nested"));

        let outcome = service
            .update_document(
                "east",
                Box::new(|mut doc: ConfigurationDocument| {
                    doc.regions.push(RegionConfig::named("customers"));
                    doc.gateway_receiver = Some(GatewayReceiverConfig::default());
                    Some(doc)
                }),
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Committed { version: 1 });

        let reopened = FilePersistenceService::new(dir.path().join("nested"));
        let document = reopened.get_document("east").await.unwrap();
        assert_eq!(document.group, "east");
        assert_eq!(document.version, 1);
        assert!(document.find_region("customers").is_some());
        assert!(document.gateway_receiver.is_some());
        assert!(!dir.path().join("nested").join("east.json.tmp").exists());
    }

    #[tokio::test]
    async fn missing_document_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let service = FilePersistenceService::new(dir.path());
        let document = service.get_document("west").await.unwrap();
        assert!(document.is_empty());
    }

    #[tokio::test]
    async fn aborted_transform_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = FilePersistenceService::new(dir.path());

        let outcome = service
            .update_document("east", Box::new(|_| None))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Aborted);
        assert!(!dir.path().join("east.json").exists());
    }

    #[tokio::test]
    async fn corrupt_document_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("east.json"), b"{ not json").unwrap();

        let service = FilePersistenceService::new(dir.path());
        assert!(matches!(
            service.get_document("east").await,
            Err(PersistenceError::Serialization { .. })
        ));
    }

    #[tokio::test]
    async fn group_names_must_be_safe_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let service = FilePersistenceService::new(dir.path());

        for group in ["", "../escape", ".hidden", "a/b"] {
            assert!(matches!(
                service.get_document(group).await,
                Err(PersistenceError::InvalidGroup { .. })
            ));
        }
    }
}

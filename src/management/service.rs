use super::ClusterManagement;
use crate::config::{ConfigurationError, ManagementConfig};
use crate::errors::{ClusterError, ClusterResult, MutationError};
use crate::invocation::{MemberInvoker, MemberTransport};
use crate::logging::{log_management_operation, log_persistence_operation};
use crate::membership::{ClusterMembership, TargetScope};
use crate::model::{
    CacheElementOperation, ClusterManagementResult, ConfigurationElement, ElementId, Status,
};
use crate::mutation::ConfigurationMutator;
use crate::persistence::{
    persistence_from_config, ConfigurationPersistenceService, DocumentTransform, UpdateOutcome,
};
use crate::realization::RealizationRequest;
use crate::registry::ElementRegistry;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Orchestrates management requests over the registry's per-type handlers.
pub struct ManagementService {
    config: ManagementConfig,
    registry: Arc<ElementRegistry>,
    membership: Arc<dyn ClusterMembership>,
    invoker: MemberInvoker,
    persistence: Option<Arc<dyn ConfigurationPersistenceService>>,
}

impl std::fmt::Debug for ManagementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementService")
            .field("cluster_group", &self.config.cluster_group)
            .field("persistence_enabled", &self.persistence.is_some())
            .field("invoker", &self.invoker)
            .field("registry", &self.registry)
            .finish()
    }
}

impl ManagementService {
    pub fn builder(config: ManagementConfig) -> ManagementServiceBuilder {
        ManagementServiceBuilder::new(config)
    }

    pub fn config(&self) -> &ManagementConfig {
        &self.config
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn persistence_enabled(&self) -> bool {
        self.persistence.is_some()
    }

    fn not_implemented(
        &self,
        operation: CacheElementOperation,
        element: &ConfigurationElement,
        scope: &TargetScope,
    ) -> ClusterError {
        let element_type = element.element_type();
        log_management_operation(
            Uuid::new_v4(),
            operation,
            &element.id(),
            scope.group_or(&self.config.cluster_group),
            "rejected",
            Some("operation not implemented"),
        );
        ClusterError::NotImplemented {
            operation,
            element_type,
        }
    }

    /// Commit the element through the group's document. Failures are
    /// returned as a FAILURE status, never as an error.
    async fn persist(
        &self,
        persistence: &dyn ConfigurationPersistenceService,
        mutator: Arc<dyn ConfigurationMutator>,
        group: &str,
        element: ConfigurationElement,
        correlation_id: Uuid,
    ) -> Status {
        let id = element.id();
        let rejection: Arc<Mutex<Option<MutationError>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&rejection);

        let transform: DocumentTransform = Box::new(move |document| {
            match mutator.add(element, document) {
                Ok(next) => Some(next),
                Err(error) => {
                    *slot.lock() = Some(error);
                    None
                }
            }
        });

        let status = match persistence.update_document(group, transform).await {
            Ok(UpdateOutcome::Committed { version }) => Status::success(format!(
                "{id} persisted to the configuration of group '{group}' (version {version})"
            )),
            Ok(UpdateOutcome::Aborted) => {
                let reason = rejection
                    .lock()
                    .take()
                    .map(|error| error.to_string())
                    .unwrap_or_else(|| "configuration update was aborted".to_string());
                Status::failure(format!(
                    "Failed to persist {id} to group '{group}': {reason}"
                ))
            }
            Err(error) => Status::failure(format!(
                "Failed to persist {id} to group '{group}': {error}"
            )),
        };

        log_persistence_operation(
            correlation_id,
            group,
            &id,
            status.is_success(),
            status.message.as_deref().unwrap_or_default(),
        );
        status
    }
}

#[async_trait]
impl ClusterManagement for ManagementService {
    async fn create(
        &self,
        element: ConfigurationElement,
        scope: TargetScope,
    ) -> ClusterResult<ClusterManagementResult> {
        let correlation_id = Uuid::new_v4();
        let operation = CacheElementOperation::Add;
        let group = scope.group_or(&self.config.cluster_group).to_string();
        let handlers = self.registry.handlers(element.element_type())?;
        let requested_id = element.id();

        log_management_operation(correlation_id, operation, &requested_id, &group, "received", None);

        let validated = handlers
            .validator
            .set_defaults_and_validate(element)
            .inspect_err(|error| {
                log_management_operation(
                    correlation_id,
                    operation,
                    &requested_id,
                    &group,
                    "validation_failed",
                    Some(&error.to_string()),
                );
            })?;
        let id: ElementId = validated.id();

        if let Some(persistence) = &self.persistence {
            let document = persistence.get_document(&group).await?;
            if handlers.mutator.exists(validated.element(), &document) {
                log_management_operation(
                    correlation_id,
                    operation,
                    &id,
                    &group,
                    "already_exists",
                    None,
                );
                return Err(ClusterError::EntityExists { id });
            }
        }

        let targets = self
            .membership
            .find_members(&[group.as_str()], &scope.members);
        if targets.is_empty() {
            let reason = if scope.members.is_empty() {
                format!("no members found in group '{group}'")
            } else {
                format!(
                    "no members of group '{group}' match [{}]",
                    scope.members.join(", ")
                )
            };
            log_management_operation(correlation_id, operation, &id, &group, "no_members", Some(&reason));
            return Err(ClusterError::NoMembers { reason });
        }

        log_management_operation(
            correlation_id,
            operation,
            &id,
            &group,
            "realizing",
            Some(&format!("{} target member(s)", targets.len())),
        );

        let request = RealizationRequest::new(operation, validated.element().clone())
            .with_correlation_id(correlation_id);
        let member_results = self.invoker.invoke_on_all(request, &targets).await?;

        let mut result = ClusterManagementResult::new();
        for (member, realization) in member_results {
            result.add_member_status(member, realization.into());
        }

        let persistence_status = match &self.persistence {
            Some(persistence) => {
                self.persist(
                    persistence.as_ref(),
                    Arc::clone(&handlers.mutator),
                    &group,
                    validated.into_inner(),
                    correlation_id,
                )
                .await
            }
            None => Status::not_applicable(),
        };
        result.set_persistence_status(persistence_status);

        if result.is_successful() {
            info!(
                correlation_id = %correlation_id,
                element = %id,
                group = %group,
                members = result.member_statuses().len(),
                "Configuration change applied"
            );
        } else {
            warn!(
                correlation_id = %correlation_id,
                element = %id,
                group = %group,
                failed_members = ?result.failed_members(),
                persistence = ?result.persistence_status().result,
                "Configuration change not fully applied"
            );
        }

        Ok(result)
    }

    async fn update(
        &self,
        element: ConfigurationElement,
        scope: TargetScope,
    ) -> ClusterResult<ClusterManagementResult> {
        Err(self.not_implemented(CacheElementOperation::Update, &element, &scope))
    }

    async fn delete(
        &self,
        element: ConfigurationElement,
        scope: TargetScope,
    ) -> ClusterResult<ClusterManagementResult> {
        Err(self.not_implemented(CacheElementOperation::Delete, &element, &scope))
    }
}

/// Assembles a [`ManagementService`] from configuration and collaborators.
pub struct ManagementServiceBuilder {
    config: ManagementConfig,
    registry: Option<Arc<ElementRegistry>>,
    membership: Option<Arc<dyn ClusterMembership>>,
    transport: Option<Arc<dyn MemberTransport>>,
    persistence: Option<Arc<dyn ConfigurationPersistenceService>>,
}

impl ManagementServiceBuilder {
    pub fn new(config: ManagementConfig) -> Self {
        Self {
            config,
            registry: None,
            membership: None,
            transport: None,
            persistence: None,
        }
    }

    /// Defaults to [`ElementRegistry::with_default_elements`].
    pub fn with_registry(mut self, registry: Arc<ElementRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_membership(mut self, membership: Arc<dyn ClusterMembership>) -> Self {
        self.membership = Some(membership);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn MemberTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Overrides the configured backend. Ignored when persistence is disabled.
    pub fn with_persistence(mut self, persistence: Arc<dyn ConfigurationPersistenceService>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    pub fn build(self) -> ClusterResult<ManagementService> {
        self.config.validate()?;

        let membership = self.membership.ok_or_else(|| {
            ConfigurationError::missing_component("membership", "management service")
        })?;
        let transport = self.transport.ok_or_else(|| {
            ConfigurationError::missing_component("transport", "management service")
        })?;

        let persistence = if self.config.persistence.enabled {
            Some(
                self.persistence
                    .unwrap_or_else(|| persistence_from_config(&self.config.persistence)),
            )
        } else {
            None
        };

        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(ElementRegistry::with_default_elements()));

        info!(
            cluster_group = %self.config.cluster_group,
            persistence_enabled = persistence.is_some(),
            member_timeout_ms = self.config.invocation.member_timeout_ms,
            element_types = ?registry.element_types(),
            "Management service initialized"
        );

        Ok(ManagementService {
            invoker: MemberInvoker::new(transport, self.config.invocation.member_timeout()),
            config: self.config,
            registry,
            membership,
            persistence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::LocalTransport;
    use crate::membership::StaticMembership;
    use crate::model::RegionConfig;

    fn builder() -> ManagementServiceBuilder {
        ManagementService::builder(ManagementConfig::default())
            .with_membership(Arc::new(StaticMembership::new()))
            .with_transport(Arc::new(LocalTransport::new()))
    }

    #[test]
    fn build_requires_membership_and_transport() {
        let error = ManagementService::builder(ManagementConfig::default())
            .with_transport(Arc::new(LocalTransport::new()))
            .build()
            .unwrap_err();
        assert!(error.to_string().contains("membership"));
    }

    #[test]
    fn build_rejects_invalid_configuration() {
        let mut config = ManagementConfig::default();
        config.invocation.member_timeout_ms = 0;
        let result = ManagementService::builder(config)
            .with_membership(Arc::new(StaticMembership::new()))
            .with_transport(Arc::new(LocalTransport::new()))
            .build();
        assert!(matches!(result, Err(ClusterError::Configuration(_))));
    }

    #[test]
    fn disabled_persistence_builds_without_backend() {
        let mut config = ManagementConfig::default();
        config.persistence.enabled = false;
        let service = ManagementService::builder(config)
            .with_membership(Arc::new(StaticMembership::new()))
            .with_transport(Arc::new(LocalTransport::new()))
            .build()
            .unwrap();
        assert!(!service.persistence_enabled());
        assert_eq!(service.registry().stats().total_element_types, 2);
    }

    #[tokio::test]
    async fn update_and_delete_are_declared_unsupported() {
        let service = builder().build().unwrap();
        let element = ConfigurationElement::from(RegionConfig::named("customers"));

        let update = service
            .update(element.clone(), TargetScope::cluster())
            .await
            .unwrap_err();
        assert_eq!(update.status_code(), 501);

        let delete = service
            .delete(element, TargetScope::cluster())
            .await
            .unwrap_err();
        assert!(matches!(
            delete,
            ClusterError::NotImplemented {
                operation: CacheElementOperation::Delete,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn create_without_members_is_rejected() {
        let service = builder().build().unwrap();
        let error = service
            .create(RegionConfig::named("customers").into(), TargetScope::cluster())
            .await
            .unwrap_err();
        assert!(matches!(error, ClusterError::NoMembers { .. }));
    }
}

//! Error types for the cluster configuration management core.
//!
//! Only pre-flight failures (validation, existence, no targets) surface as
//! [`ClusterError`] from a management request. Anything that goes wrong once
//! members have been contacted is folded into the
//! [`ClusterManagementResult`](crate::model::ClusterManagementResult) instead.

use crate::config::ConfigurationError;
use crate::model::{CacheElementOperation, ElementId, ElementType};
use thiserror::Error;

/// Malformed or contradictory element input. Never reaches members or persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{element_type} is missing required field '{field}'")]
    MissingField {
        element_type: ElementType,
        field: String,
    },
    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Contradictory configuration: {0}")]
    Contradiction(String),
    #[error("Validator for {expected} cannot validate a {actual} element")]
    ElementTypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },
}

impl ValidationError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures of the pure document mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("{0} already exists in the persisted configuration")]
    AlreadyExists(ElementId),
    #[error("{0} does not exist in the persisted configuration")]
    NotFound(ElementId),
    #[error("Mutator for {expected} cannot apply a {actual} element")]
    ElementTypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },
}

/// Failures of the member fan-out as a whole. Per-member failures are never
/// represented here; they become failed realization results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    #[error("No target members supplied for {operation} of {element}")]
    NoTargetMembers {
        operation: CacheElementOperation,
        element: ElementId,
    },
}

/// Errors raised by a configuration persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Invalid configuration group name '{group}': {reason}")]
    InvalidGroup { group: String, reason: String },
    #[error("Failed to {operation} configuration for group '{group}': {reason}")]
    Io {
        group: String,
        operation: String,
        reason: String,
    },
    #[error("Configuration document for group '{group}' could not be (de)serialized: {reason}")]
    Serialization { group: String, reason: String },
}

/// Errors raised by member-side realizers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RealizerError {
    #[error("{operation} is not implemented for {element_type} realization")]
    NotImplemented {
        operation: CacheElementOperation,
        element_type: ElementType,
    },
}

/// Errors raised while registering or resolving per-element-type handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("No handlers registered for element type {0}")]
    UnsupportedElementType(ElementType),
    #[error("Handlers for element type {0} are already registered")]
    DuplicateRegistration(ElementType),
    #[error("Inconsistent handlers: {component} handles {actual}, expected {expected}")]
    InconsistentHandlers {
        component: String,
        expected: ElementType,
        actual: ElementType,
    },
}

/// Crate-level error returned by management requests.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Cache element {id} already exists")]
    EntityExists { id: ElementId },
    #[error("No members found: {reason}")]
    NoMembers { reason: String },
    #[error("{operation} of {element_type} elements is not implemented")]
    NotImplemented {
        operation: CacheElementOperation,
        element_type: ElementType,
    },
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Invocation error: {0}")]
    Invocation(#[from] InvocationError),
    #[error("Realizer error: {0}")]
    Realizer(#[from] RealizerError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl ClusterError {
    /// HTTP-style status code the request-reception layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ClusterError::Validation(_) => 400,
            ClusterError::Registry(RegistryError::UnsupportedElementType(_)) => 400,
            ClusterError::EntityExists { .. } => 409,
            ClusterError::Mutation(MutationError::AlreadyExists(_)) => 409,
            ClusterError::Mutation(MutationError::NotFound(_)) => 404,
            ClusterError::NoMembers { .. } => 404,
            ClusterError::Invocation(InvocationError::NoTargetMembers { .. }) => 404,
            ClusterError::NotImplemented { .. } => 501,
            ClusterError::Realizer(RealizerError::NotImplemented { .. }) => 501,
            _ => 500,
        }
    }

    /// True when the caller, not the cluster, is at fault.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

pub type ClusterResult<T> = anyhow::Result<T, ClusterError>;

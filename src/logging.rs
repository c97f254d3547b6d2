//! # Structured Logging Module
//!
//! Environment-aware structured logging for management requests. Every
//! request carries a `correlation_id` which is always the first field of the
//! domain log events below, so a single request can be followed through
//! validation, fan-out and persistence.

use crate::config::loader::detect_environment;
use crate::config::LoggingConfig;
use crate::model::{CacheElementOperation, ElementId, MemberRef};
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging with environment defaults
pub fn init_structured_logging() {
    init_from_config(&LoggingConfig::default());
}

/// Initialize console logging from loaded configuration.
///
/// Safe to call repeatedly; only the first call installs a subscriber, and an
/// already-installed global subscriber is left in place.
pub fn init_from_config(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = detect_environment();
        let log_level = config
            .level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| default_log_level(&environment).to_string());

        let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

        let installed = if config.json {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_filter(filter),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_ansi(std::io::stdout().is_terminal())
                        .with_filter(filter),
                )
                .try_init()
        };

        if installed.is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            json = config.json,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log a stage transition of a management request
pub fn log_management_operation(
    correlation_id: Uuid,
    operation: CacheElementOperation,
    element: &ElementId,
    group: &str,
    stage: &str,
    details: Option<&str>,
) {
    tracing::info!(
        correlation_id = %correlation_id,
        operation = %operation,
        element = %element,
        group = %group,
        stage = %stage,
        details = details,
        "📋 MANAGEMENT_OPERATION"
    );
}

/// Log the outcome of realizing an element on one member
pub fn log_member_realization(
    correlation_id: Uuid,
    member: &MemberRef,
    element: &ElementId,
    success: bool,
    message: &str,
) {
    if success {
        tracing::debug!(
            correlation_id = %correlation_id,
            member = %member,
            element = %element,
            message = %message,
            "🔧 MEMBER_REALIZATION"
        );
    } else {
        tracing::warn!(
            correlation_id = %correlation_id,
            member = %member,
            element = %element,
            message = %message,
            "🔧 MEMBER_REALIZATION failed"
        );
    }
}

/// Log the outcome of committing a group's configuration document
pub fn log_persistence_operation(
    correlation_id: Uuid,
    group: &str,
    element: &ElementId,
    success: bool,
    details: &str,
) {
    if success {
        tracing::info!(
            correlation_id = %correlation_id,
            group = %group,
            element = %element,
            details = %details,
            "💾 PERSISTENCE"
        );
    } else {
        tracing::error!(
            correlation_id = %correlation_id,
            group = %group,
            element = %element,
            details = %details,
            "💾 PERSISTENCE failed"
        );
    }
}

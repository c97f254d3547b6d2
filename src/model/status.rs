use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusResult {
    Success,
    Failure,
    /// The measured dimension does not apply, e.g. persistence when it is disabled.
    NotApplicable,
}

/// Outcome of one dimension of a management request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub result: StatusResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Status {
    pub fn new(success: bool, message: impl Into<String>) -> Self {
        let result = if success {
            StatusResult::Success
        } else {
            StatusResult::Failure
        };
        Self {
            result,
            message: Some(message.into()),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    pub fn not_applicable() -> Self {
        Self {
            result: StatusResult::NotApplicable,
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == StatusResult::Success
    }
}

/// Per-member outcome of a realizer operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizationResult {
    pub success: bool,
    pub message: String,
}

impl RealizationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<RealizationResult> for Status {
    fn from(result: RealizationResult) -> Self {
        Status::new(result.success, result.message)
    }
}

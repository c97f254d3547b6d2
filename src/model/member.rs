use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one live cluster member by name. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberRef(String);

impl MemberRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MemberRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

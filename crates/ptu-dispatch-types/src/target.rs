use serde::{Deserialize, Serialize};

use crate::completion::Completion;

/// One deployment endpoint, identified by its logical deployment name.
/// Credentials and the base address live inside the Transport, not here.
/// Two instances exist for the lifetime of a process: primary and fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchTarget {
    pub deployment: String,
}

impl DispatchTarget {
    pub fn new(deployment: impl Into<String>) -> Self {
        Self {
            deployment: deployment.into(),
        }
    }
}

impl std::fmt::Display for DispatchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.deployment)
    }
}

/// Which deployment ultimately served a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServedBy {
    Primary,
    Fallback,
}

impl ServedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ServedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed dispatch: the model response plus the deployment that served
/// it. Returned once per call; no state is retained across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    pub completion: Completion,
    pub served_by: ServedBy,
}

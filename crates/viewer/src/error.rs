use thiserror::Error;

/// Generic label used when a failure carries no message of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The single user-visible failure kind: a point-cloud load that did not
/// complete. Every failure along the load sequence collapses into this,
/// keeping whatever message the underlying error carried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build from an optional underlying message, falling back to the
    /// generic label when the failure carries none.
    pub fn from_message(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        Self { message }
    }

    /// Text for the blocking alert shown to the user.
    pub fn alert_text(&self) -> String {
        format!("Failed to load point cloud: {}", self.message)
    }
}

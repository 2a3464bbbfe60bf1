//! Error types for ghx-core

use thiserror::Error;

/// Result type alias for ghx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or loading a workflow
#[derive(Error, Debug)]
pub enum Error {
    /// Workflow file could not be found
    #[error("workflow not found: {path}")]
    WorkflowNotFound {
        /// Path that was searched
        path: String,
    },

    /// The document parsed, but its root is not a mapping
    #[error("workflow file is empty or malformed")]
    MalformedWorkflow,

    /// Failed to parse YAML
    #[error("failed to parse workflow: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Workflow name given on the command line is unusable
    #[error("invalid workflow name '{name}': {message}")]
    InvalidWorkflowName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for script compilation

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a compilation.
///
/// Every fatal condition surfaces as one of these; an unsupported runner is
/// not among them because it only skips a single matrix combination.
#[derive(Error, Debug)]
pub enum Error {
    /// The workflow could not be located or parsed
    #[error(transparent)]
    Load(#[from] ghx_core::Error),

    /// The workflow declares no jobs
    #[error("No jobs found in workflow.")]
    NoJobs,

    /// A job has a missing or malformed required shape
    #[error("Job '{job}' {message}.")]
    Structural {
        /// Job name
        job: String,
        /// What is wrong with it
        message: String,
    },

    /// A step asks for a shell other than the emitted one
    #[error("Job '{job}' step '{step}' specifies shell; custom shells are not supported.")]
    UnsupportedShell {
        /// Job name
        job: String,
        /// Step name, or `#<n>` for unnamed steps
        step: String,
    },

    /// `inputs.<name>` refers to an input that is not declared
    #[error("Input '{name}' not defined.")]
    UndefinedInput {
        /// Input name as written in the placeholder
        name: String,
    },

    /// `inputs.<name>` refers to an input without a default
    #[error("Input '{name}' has no default value.")]
    MissingInputDefault {
        /// Input name as written in the placeholder
        name: String,
    },

    /// `matrix.<name>` refers to an axis outside the current combination
    #[error("Matrix value '{name}' not defined.")]
    UndefinedMatrixValue {
        /// Axis name as written in the placeholder
        name: String,
    },

    /// A `$` survived every rewrite
    #[error("Unsupported template expression found: {line}")]
    UnsupportedExpression {
        /// The offending line, positional markers removed
        line: String,
    },
}

impl Error {
    pub(crate) fn structural(job: &str, message: impl Into<String>) -> Self {
        Self::Structural {
            job: job.to_string(),
            message: message.into(),
        }
    }
}

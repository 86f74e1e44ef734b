use thiserror::Error;

/// Errors produced by session management, element resolution, and flow execution.
///
/// Resolver and extractor misses are not represented here: a prompt without
/// credentials or a page without a password field yields `None` fields in the
/// corresponding output, not an error. Step-level faults are caught at the
/// executor boundary and recorded in the run report.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Chrome could not be launched or connected to
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    /// An action other than navigate was attempted without an open page
    #[error("no active page")]
    NoActivePage,

    /// Navigation did not complete
    #[error("failed to navigate to {url}: {reason}")]
    NavigationFailed { url: String, reason: String },

    /// A selector resolved to nothing
    #[error("element '{0}' not found")]
    ElementNotFound(String),

    /// A wait ran out of time
    #[error("timed out after {timeout_ms}ms waiting for '{selector}'")]
    Timeout { selector: String, timeout_ms: u64 },

    /// A flow step carried an unrecognized action tag
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// An in-page script probe failed
    #[error("script evaluation failed: {0}")]
    EvaluationFailed(String),

    /// An action was dispatched but failed mid-execution
    #[error("action '{action}' failed: {reason}")]
    ActionFailed { action: String, reason: String },

    /// The prompt contained no URL to navigate to
    #[error("no URL found in prompt")]
    NoUrlInPrompt,

    /// Report or screenshot persistence failed
    #[error("report I/O failed: {0}")]
    ReportIo(#[from] std::io::Error),

    /// A wire payload could not be serialized
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, FlowError>;

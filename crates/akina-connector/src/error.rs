//! Connector error types
//!
//! Error definitions with fatal/per-customer classification: session
//! establishment failures abort a sync run, everything after a session is
//! open is charged to the customer in progress.

use thiserror::Error;

/// Error that can occur while talking to a remote device.
#[derive(Debug, Error)]
pub enum ConnectorError {
    // Configuration errors (caught before any network attempt)
    /// Connection parameters are missing or invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    // Session establishment errors (fatal to the whole run)
    /// Failed to establish a connection to the device.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Connection attempt timed out.
    #[error("connection timeout after {timeout_secs} seconds")]
    ConnectionTimeout { timeout_secs: u64 },

    /// The device rejected the credential pair.
    #[error("authentication failed: invalid credentials")]
    AuthenticationFailed,

    // Command errors (charged to the customer in progress)
    /// A command failed after the session was open.
    #[error("command failed: {command}: {message}")]
    ExecutionFailed {
        command: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A command did not complete within the per-command timeout.
    ///
    /// The command may or may not have been applied on the device; the
    /// protocol gives no way to tell.
    #[error("command timeout after {timeout_secs} seconds: {command}")]
    CommandTimeout { command: String, timeout_secs: u64 },

    // Data-configuration errors ("fix the data", not "fix the network")
    /// A service plan has no remote profile mapping.
    #[error("plan '{plan}' has no remote profile configured")]
    MissingProfile { plan: String },

    /// A value cannot be represented in the device's command syntax.
    #[error("invalid data: {message}")]
    InvalidData { message: String },
}

impl ConnectorError {
    /// Check if this error aborts a whole sync run.
    ///
    /// Fatal errors occur before or during session establishment; once a
    /// session is open, failures are recorded per customer instead.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConnectorError::InvalidConfiguration { .. }
                | ConnectorError::ConnectionFailed { .. }
                | ConnectorError::ConnectionTimeout { .. }
                | ConnectorError::AuthenticationFailed
        )
    }

    /// Check if this error points at the customer/plan data rather than
    /// the network or the device.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ConnectorError::MissingProfile { .. } | ConnectorError::InvalidData { .. }
        )
    }

    /// Get a stable code for operator-facing classification.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            ConnectorError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            ConnectorError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            ConnectorError::ConnectionTimeout { .. } => "CONNECTION_TIMEOUT",
            ConnectorError::AuthenticationFailed => "AUTH_FAILED",
            ConnectorError::ExecutionFailed { .. } => "EXECUTION_FAILED",
            ConnectorError::CommandTimeout { .. } => "COMMAND_TIMEOUT",
            ConnectorError::MissingProfile { .. } => "MISSING_PROFILE",
            ConnectorError::InvalidData { .. } => "INVALID_DATA",
        }
    }

    // Convenience constructors

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        ConnectorError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        ConnectorError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an execution failed error.
    pub fn execution_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        ConnectorError::ExecutionFailed {
            command: command.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an execution failed error with source.
    pub fn execution_failed_with_source(
        command: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::ExecutionFailed {
            command: command.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a command timeout error.
    pub fn command_timeout(command: impl Into<String>, timeout_secs: u64) -> Self {
        ConnectorError::CommandTimeout {
            command: command.into(),
            timeout_secs,
        }
    }

    /// Create a missing profile error.
    pub fn missing_profile(plan: impl Into<String>) -> Self {
        ConnectorError::MissingProfile { plan: plan.into() }
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        ConnectorError::InvalidData {
            message: message.into(),
        }
    }
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;

//! MikroTik connector configuration
//!
//! Connection descriptor for one RouterOS device. Sourced from persisted
//! router settings outside the engine; the connector receives it by value
//! per session.

use serde::{Deserialize, Serialize};

use akina_connector::config::ConnectionSettings;
use akina_connector::error::{ConnectorError, ConnectorResult};

/// Configuration for one MikroTik router reachable over SSH.
#[derive(Clone, Serialize, Deserialize)]
pub struct MikrotikTarget {
    /// Display name for this router (e.g. the coverage area it serves).
    pub name: String,

    /// Router hostname or IP address.
    pub host: String,

    /// SSH port. The stored RouterOS API port (8728) does not apply here;
    /// the shell integration always speaks SSH.
    #[serde(default = "default_ssh_port")]
    pub port: u16,

    /// SSH username.
    pub username: String,

    /// SSH password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Whether this router participates in synchronization.
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Connection settings (timeouts).
    #[serde(default)]
    pub connection: ConnectionSettings,
}

fn default_ssh_port() -> u16 {
    22
}

fn default_true() -> bool {
    true
}

impl std::fmt::Debug for MikrotikTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MikrotikTarget")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***REDACTED***"))
            .field("is_active", &self.is_active)
            .field("connection", &self.connection)
            .finish()
    }
}

impl MikrotikTarget {
    /// Create a new target with required fields.
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port: default_ssh_port(),
            username: username.into(),
            password: None,
            is_active: true,
            connection: ConnectionSettings::default(),
        }
    }

    /// Set the SSH password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the SSH port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set connection settings.
    #[must_use]
    pub fn with_connection(mut self, connection: ConnectionSettings) -> Self {
        self.connection = connection;
        self
    }

    /// Mark this target as excluded from synchronization.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Get the `host:port` address string.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the configuration.
    ///
    /// Checked before any network attempt: a session may only open with a
    /// non-empty host and credential pair.
    pub fn validate(&self) -> ConnectorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConnectorError::invalid_configuration("host is required"));
        }

        if self.username.trim().is_empty() {
            return Err(ConnectorError::invalid_configuration(
                "username is required",
            ));
        }

        match &self.password {
            Some(password) if !password.is_empty() => {}
            _ => {
                return Err(ConnectorError::invalid_configuration(
                    "password is required",
                ));
            }
        }

        Ok(())
    }

    /// Create a redacted version of this target (for logging/display).
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut target = self.clone();
        if target.password.is_some() {
            target.password = Some("***REDACTED***".to_string());
        }
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> MikrotikTarget {
        MikrotikTarget::new("North Coverage", "10.10.0.1", "admin").with_password("secret")
    }

    #[test]
    fn test_target_new() {
        let target = target();
        assert_eq!(target.host, "10.10.0.1");
        assert_eq!(target.port, 22);
        assert!(target.is_active);
        assert_eq!(target.addr(), "10.10.0.1:22");
    }

    #[test]
    fn test_validate_ok() {
        assert!(target().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut bad = target();
        bad.host = "  ".to_string();
        let err = bad.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_validate_empty_username() {
        let mut bad = target();
        bad.username = String::new();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validate_missing_password() {
        let mut bad = target();
        bad.password = None;
        assert!(bad.validate().is_err());

        bad.password = Some(String::new());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_redacted() {
        let redacted = target().redacted();
        assert_eq!(redacted.password, Some("***REDACTED***".to_string()));
        assert_eq!(redacted.host, "10.10.0.1");
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", target());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("***REDACTED***"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let json = serde_json::to_string(&target().inactive()).unwrap();
        let parsed: MikrotikTarget = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.host, "10.10.0.1");
        assert!(!parsed.is_active);
        assert_eq!(parsed.connection.command_timeout_secs, 30);
    }

    #[test]
    fn test_deserialization_defaults() {
        let parsed: MikrotikTarget = serde_json::from_str(
            r#"{"name": "South", "host": "router.south", "username": "admin", "password": "pw"}"#,
        )
        .unwrap();

        assert_eq!(parsed.port, 22);
        assert!(parsed.is_active);
    }
}

//! PPPoE secret command protocol.
//!
//! Renders RouterOS command lines and decodes the device's free-text
//! replies. RouterOS has no machine-readable output mode over the shell,
//! so every decode step is a narrowly-scoped pattern match over echoed
//! text and is best-effort by nature.
//!
//! Every call logs the exact command issued and the raw response; the
//! protocol has no other audit trail.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use akina_connector::error::{ConnectorError, ConnectorResult};
use akina_connector::traits::CommandShell;

/// Profile names as echoed by `/ppp profile print`, e.g.
/// ` 0   name="default" local-address=0.0.0.0 ...`.
static PROFILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"name="([^"]+)""#).expect("PROFILE_NAME_RE is a valid regex pattern")
});

/// Which branch an upsert took on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretAction {
    /// No secret existed; one was created.
    Created,
    /// A secret existed; it was enabled and its profile updated.
    Enabled,
}

impl SecretAction {
    /// Convert to string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretAction::Created => "created",
            SecretAction::Enabled => "enabled",
        }
    }
}

impl std::fmt::Display for SecretAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Command protocol adapter over one open shell.
///
/// Owns the shell for its lifetime; [`close`](Self::close) releases it.
pub struct MikrotikClient<S> {
    shell: S,
}

impl<S: CommandShell> MikrotikClient<S> {
    /// Wrap an open command shell.
    pub fn new(shell: S) -> Self {
        Self { shell }
    }

    /// Check whether a PPPoE secret with the given name exists.
    ///
    /// Issues a filtered listing and reports true iff the echoed output
    /// contains the literal name token. Known protocol limitation: a name
    /// that is a substring of another secret's name yields a false
    /// positive, because the reply is matched as free text.
    pub async fn secret_exists(&mut self, name: &str) -> ConnectorResult<bool> {
        validate_name(name)?;

        let command = format!(r#"/ppp secret print where name="{name}""#);
        let output = self.run(&command).await?;

        Ok(output.contains(name))
    }

    /// Mark a secret disabled.
    ///
    /// The device gives no confirmation signal beyond echoed text, so
    /// non-error completion is treated as success; the mutation is not
    /// read back.
    pub async fn disable_secret(&mut self, name: &str) -> ConnectorResult<()> {
        validate_name(name)?;

        let command = format!(r#"/ppp secret set [find name="{name}"] disabled=yes"#);
        self.run(&command).await?;

        Ok(())
    }

    /// Create the secret, or enable it and set its profile if it already
    /// exists. Returns which branch was taken.
    pub async fn upsert_secret(
        &mut self,
        name: &str,
        profile: &str,
        password: &str,
    ) -> ConnectorResult<SecretAction> {
        validate_name(name)?;
        validate_token("profile", profile)?;
        validate_token("password", password)?;

        if self.secret_exists(name).await? {
            let command =
                format!(r#"/ppp secret set [find name="{name}"] disabled=no profile={profile}"#);
            self.run(&command).await?;
            Ok(SecretAction::Enabled)
        } else {
            let command = format!(
                r#"/ppp secret add name="{name}" password={password} service=pppoe profile={profile}"#
            );
            self.run(&command).await?;
            Ok(SecretAction::Created)
        }
    }

    /// List the PPPoE profile names defined on the device, in order of
    /// appearance.
    ///
    /// Returns an empty catalog (not an error) when nothing matches; a
    /// router with no profiles is a valid, reportable state.
    pub async fn list_profiles(&mut self) -> ConnectorResult<Vec<String>> {
        let output = self.run("/ppp profile print").await?;

        let profiles = PROFILE_NAME_RE
            .captures_iter(&output)
            .map(|captures| captures[1].to_string())
            .collect();

        Ok(profiles)
    }

    /// Release the underlying shell.
    pub async fn close(mut self) -> ConnectorResult<()> {
        self.shell.close().await
    }

    async fn run(&mut self, command: &str) -> ConnectorResult<String> {
        debug!(command = %command, "issuing command");
        let output = self.shell.exec(command).await?;
        info!(command = %command, output = %output, "command completed");
        Ok(output)
    }
}

/// Reject names that cannot sit inside the protocol's quoted position.
fn validate_name(name: &str) -> ConnectorResult<()> {
    if name.is_empty() {
        return Err(ConnectorError::invalid_data("secret name is empty"));
    }
    if name.contains('"') || name.contains('\n') || name.contains('\r') {
        return Err(ConnectorError::invalid_data(format!(
            "secret name {name:?} contains characters that cannot be quoted"
        )));
    }
    Ok(())
}

/// Reject values that cannot sit in an unquoted token position.
fn validate_token(field: &str, value: &str) -> ConnectorResult<()> {
    if value.is_empty() {
        return Err(ConnectorError::invalid_data(format!("{field} is empty")));
    }
    if value.contains(char::is_whitespace) || value.contains('"') {
        return Err(ConnectorError::invalid_data(format!(
            "{field} {value:?} contains whitespace or quotes"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use akina_connector::async_trait;
    use std::collections::VecDeque;

    /// Shell stand-in that asserts the exact command sequence and plays
    /// back canned replies.
    struct ScriptedShell {
        script: VecDeque<(&'static str, ConnectorResult<String>)>,
        closed: bool,
    }

    impl ScriptedShell {
        fn new(script: Vec<(&'static str, ConnectorResult<String>)>) -> Self {
            Self {
                script: script.into_iter().collect(),
                closed: false,
            }
        }
    }

    #[async_trait]
    impl CommandShell for ScriptedShell {
        async fn exec(&mut self, command: &str) -> ConnectorResult<String> {
            let (expected, reply) = self
                .script
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected command: {command}"));
            assert_eq!(command, expected);
            reply
        }

        async fn close(&mut self) -> ConnectorResult<()> {
            self.closed = true;
            Ok(())
        }
    }

    fn ok(output: &str) -> ConnectorResult<String> {
        Ok(output.to_string())
    }

    #[tokio::test]
    async fn test_secret_exists_true() {
        let shell = ScriptedShell::new(vec![(
            r#"/ppp secret print where name="Alice""#,
            ok(r#"Flags: X - disabled
 0   name="Alice" service=pppoe profile=pppoe-10mbps"#),
        )]);
        let mut client = MikrotikClient::new(shell);

        assert!(client.secret_exists("Alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_secret_exists_false() {
        let shell = ScriptedShell::new(vec![(
            r#"/ppp secret print where name="Alice""#,
            ok("Flags: X - disabled\n"),
        )]);
        let mut client = MikrotikClient::new(shell);

        assert!(!client.secret_exists("Alice").await.unwrap());
    }

    /// Substring names match other secrets' echoes. This is the documented
    /// protocol limitation, asserted here so a future "fix" is a conscious
    /// wire-compatibility decision.
    #[tokio::test]
    async fn test_secret_exists_substring_false_positive() {
        let shell = ScriptedShell::new(vec![(
            r#"/ppp secret print where name="Ann""#,
            ok(r#" 0   name="Annette" service=pppoe"#),
        )]);
        let mut client = MikrotikClient::new(shell);

        assert!(client.secret_exists("Ann").await.unwrap());
    }

    #[tokio::test]
    async fn test_disable_secret_wire_format() {
        let shell = ScriptedShell::new(vec![(
            r#"/ppp secret set [find name="Bob"] disabled=yes"#,
            ok(""),
        )]);
        let mut client = MikrotikClient::new(shell);

        client.disable_secret("Bob").await.unwrap();
    }

    #[tokio::test]
    async fn test_upsert_creates_when_absent() {
        let shell = ScriptedShell::new(vec![
            (r#"/ppp secret print where name="Alice""#, ok("")),
            (
                r#"/ppp secret add name="Alice" password=pppoe123 service=pppoe profile=pppoe-10mbps"#,
                ok(""),
            ),
        ]);
        let mut client = MikrotikClient::new(shell);

        let action = client
            .upsert_secret("Alice", "pppoe-10mbps", "pppoe123")
            .await
            .unwrap();
        assert_eq!(action, SecretAction::Created);
    }

    #[tokio::test]
    async fn test_upsert_enables_when_present() {
        let shell = ScriptedShell::new(vec![
            (
                r#"/ppp secret print where name="Alice""#,
                ok(r#" 0   name="Alice" profile=old"#),
            ),
            (
                r#"/ppp secret set [find name="Alice"] disabled=no profile=pppoe-10mbps"#,
                ok(""),
            ),
        ]);
        let mut client = MikrotikClient::new(shell);

        let action = client
            .upsert_secret("Alice", "pppoe-10mbps", "pppoe123")
            .await
            .unwrap();
        assert_eq!(action, SecretAction::Enabled);
    }

    #[tokio::test]
    async fn test_upsert_twice_enables_both_times() {
        let exists = r#" 0   name="Alice" service=pppoe profile=pppoe-10mbps"#;
        let shell = ScriptedShell::new(vec![
            (r#"/ppp secret print where name="Alice""#, ok(exists)),
            (
                r#"/ppp secret set [find name="Alice"] disabled=no profile=pppoe-10mbps"#,
                ok(""),
            ),
            (r#"/ppp secret print where name="Alice""#, ok(exists)),
            (
                r#"/ppp secret set [find name="Alice"] disabled=no profile=pppoe-10mbps"#,
                ok(""),
            ),
        ]);
        let mut client = MikrotikClient::new(shell);

        // no add command is ever scripted, so a duplicate create would panic
        for _ in 0..2 {
            let action = client
                .upsert_secret("Alice", "pppoe-10mbps", "pppoe123")
                .await
                .unwrap();
            assert_eq!(action, SecretAction::Enabled);
        }
    }

    #[tokio::test]
    async fn test_list_profiles_extracts_names_in_order() {
        let shell = ScriptedShell::new(vec![(
            "/ppp profile print",
            ok(r#"Flags: * - default
 0 * name="default" local-address=0.0.0.0 remote-address=0.0.0.0 use-mpls=default
 1   name="fiber-50" local-address=10.0.0.1 rate-limit=50M/50M"#),
        )]);
        let mut client = MikrotikClient::new(shell);

        let profiles = client.list_profiles().await.unwrap();
        assert_eq!(profiles, vec!["default", "fiber-50"]);
    }

    #[tokio::test]
    async fn test_list_profiles_empty_is_not_an_error() {
        let shell = ScriptedShell::new(vec![("/ppp profile print", ok("Flags: * - default\n"))]);
        let mut client = MikrotikClient::new(shell);

        let profiles = client.list_profiles().await.unwrap();
        assert!(profiles.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_unquotable_name() {
        let shell = ScriptedShell::new(vec![]);
        let mut client = MikrotikClient::new(shell);

        let err = client.secret_exists(r#"Ali"ce"#).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DATA");
    }

    #[tokio::test]
    async fn test_rejects_whitespace_in_token_positions() {
        let shell = ScriptedShell::new(vec![]);
        let mut client = MikrotikClient::new(shell);

        let err = client
            .upsert_secret("Alice", "pppoe 10mbps", "pppoe123")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DATA");

        let shell = ScriptedShell::new(vec![]);
        let mut client = MikrotikClient::new(shell);
        let err = client
            .upsert_secret("Alice", "pppoe-10mbps", "")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DATA");
    }

    #[tokio::test]
    async fn test_shell_errors_propagate() {
        let shell = ScriptedShell::new(vec![(
            r#"/ppp secret print where name="Alice""#,
            Err(ConnectorError::execution_failed(
                r#"/ppp secret print where name="Alice""#,
                "channel closed",
            )),
        )]);
        let mut client = MikrotikClient::new(shell);

        let err = client.secret_exists("Alice").await.unwrap_err();
        assert_eq!(err.error_code(), "EXECUTION_FAILED");
    }

    #[tokio::test]
    async fn test_close_releases_shell() {
        let shell = ScriptedShell::new(vec![]);
        let client = MikrotikClient::new(shell);

        client.close().await.unwrap();
    }

    #[test]
    fn test_secret_action_display() {
        assert_eq!(SecretAction::Created.to_string(), "created");
        assert_eq!(SecretAction::Enabled.to_string(), "enabled");
    }
}

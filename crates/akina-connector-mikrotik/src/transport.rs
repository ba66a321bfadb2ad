//! SSH session transport for RouterOS devices.
//!
//! One authenticated session per sync run; every command goes out on its
//! own exec channel over that session, strictly one at a time. Opening is
//! an explicit two-phase operation so configuration errors are separable
//! from transient connection failures and from credential rejection.

use std::sync::Arc;
use std::time::Duration;

use russh::client;
use russh::keys::ssh_key;
use russh::{ChannelMsg, Disconnect};
use tracing::{debug, info, instrument, warn};

use akina_connector::error::{ConnectorError, ConnectorResult};
use akina_connector::traits::CommandShell;
use akina_connector::async_trait;

use crate::config::MikrotikTarget;

/// SSH client event handler.
///
/// Host keys are accepted without pinning; RouterOS targets are reached
/// over the management network, and stored fingerprints do not survive a
/// device reset.
struct ClientHandler;

impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &ssh_key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// An open, authenticated command channel to one router.
pub struct SshShell {
    session: client::Handle<ClientHandler>,
    addr: String,
    command_timeout: Duration,
}

impl SshShell {
    /// Open a session to the given target.
    ///
    /// Fails with `InvalidConfiguration` before any network attempt if the
    /// target is incomplete, `ConnectionFailed`/`ConnectionTimeout` if the
    /// host is unreachable, and `AuthenticationFailed` if the router
    /// rejects the credentials (the half-open session is disconnected
    /// before the error is returned).
    #[instrument(skip_all, fields(host = %target.host, port = target.port))]
    pub async fn open(target: &MikrotikTarget) -> ConnectorResult<Self> {
        target.validate()?;

        let addr = target.addr();
        let settings = &target.connection;
        let config = Arc::new(client::Config::default());

        debug!(addr = %addr, "connecting to router");

        let mut session = tokio::time::timeout(
            settings.connect_timeout(),
            client::connect(
                config,
                (target.host.as_str(), target.port),
                ClientHandler,
            ),
        )
        .await
        .map_err(|_| ConnectorError::ConnectionTimeout {
            timeout_secs: settings.connect_timeout_secs,
        })?
        .map_err(|e| {
            ConnectorError::connection_failed_with_source(
                format!("failed to connect to {addr}"),
                e,
            )
        })?;

        // validate() guarantees the password is present and non-empty
        let password = target.password.as_deref().unwrap_or_default();

        let auth = session
            .authenticate_password(target.username.as_str(), password)
            .await
            .map_err(|e| {
                ConnectorError::connection_failed_with_source(
                    format!("ssh authentication exchange with {addr} failed"),
                    e,
                )
            })?;

        if !auth.success() {
            let _ = session
                .disconnect(Disconnect::ByApplication, "", "en")
                .await;
            return Err(ConnectorError::AuthenticationFailed);
        }

        info!(addr = %addr, "ssh session established");

        Ok(Self {
            session,
            addr,
            command_timeout: settings.command_timeout(),
        })
    }

    /// Run one command on a fresh exec channel and collect its output.
    async fn exec_channel(&mut self, line: &str, command: &str) -> ConnectorResult<String> {
        let mut channel = self.session.channel_open_session().await.map_err(|e| {
            ConnectorError::execution_failed_with_source(command, "failed to open channel", e)
        })?;

        channel.exec(true, line).await.map_err(|e| {
            ConnectorError::execution_failed_with_source(command, "failed to send command", e)
        })?;

        let mut output = Vec::new();
        loop {
            let Some(msg) = channel.wait().await else {
                break;
            };
            match msg {
                ChannelMsg::Data { ref data } => output.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, .. } => output.extend_from_slice(data),
                ChannelMsg::ExitStatus { exit_status } => {
                    // RouterOS exit codes carry no signal; the echoed text
                    // is the only reply contract.
                    debug!(addr = %self.addr, exit_status, "command channel exited");
                }
                _ => {}
            }
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[async_trait]
impl CommandShell for SshShell {
    async fn exec(&mut self, command: &str) -> ConnectorResult<String> {
        let line = terminate(command);
        let timeout = self.command_timeout;

        match tokio::time::timeout(timeout, self.exec_channel(&line, command)).await {
            Ok(result) => result,
            Err(_) => Err(ConnectorError::command_timeout(command, timeout.as_secs())),
        }
    }

    async fn close(&mut self) -> ConnectorResult<()> {
        if let Err(e) = self
            .session
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
        {
            warn!(addr = %self.addr, error = %e, "error during ssh disconnect");
            return Err(ConnectorError::connection_failed_with_source(
                format!("failed to disconnect from {}", self.addr),
                e,
            ));
        }

        info!(addr = %self.addr, "ssh session closed");
        Ok(())
    }
}

/// Terminate a command line with exactly one newline.
fn terminate(command: &str) -> String {
    let mut line = command.trim_end_matches(['\r', '\n']).to_string();
    line.push('\n');
    line
}

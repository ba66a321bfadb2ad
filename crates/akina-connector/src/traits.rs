//! Transport trait seam between the sync engine and the wire.

use async_trait::async_trait;

use crate::error::ConnectorResult;

/// One authenticated, sequential command channel to a remote device.
///
/// The underlying shell protocol is not safe for concurrent use on a
/// single connection, so execution is serialized through `&mut self`:
/// holding the shell exclusively is what guarantees commands go out one
/// at a time, in order.
///
/// Implementations must release the channel in [`close`](Self::close);
/// callers own exactly one `close` on every exit path so authenticated
/// handles are never leaked to the device.
#[async_trait]
pub trait CommandShell: Send {
    /// Execute one command line and return the raw textual reply.
    ///
    /// The command is passed without a terminator; the transport appends
    /// the single trailing newline the device expects. Transport-level
    /// failures (disconnect mid-command, timeout) surface as errors; no
    /// retries happen at this layer.
    async fn exec(&mut self, command: &str) -> ConnectorResult<String>;

    /// Close the channel.
    async fn close(&mut self) -> ConnectorResult<()>;
}

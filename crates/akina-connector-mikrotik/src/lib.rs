//! # MikroTik Connector
//!
//! RouterOS connector for akina customer synchronization.
//!
//! This crate provides the ability to manage PPPoE secrets on MikroTik
//! routers over an authenticated SSH command shell:
//!
//! - SSH session lifecycle (explicit two-phase open, deterministic close)
//! - Line-oriented RouterOS command rendering
//! - Best-effort decoding of the device's free-text replies
//! - Per-command timeouts (the remote shell can hang)
//!
//! ## Example
//!
//! ```ignore
//! use akina_connector_mikrotik::{MikrotikClient, MikrotikTarget, SshShell};
//!
//! let target = MikrotikTarget::new("North Coverage", "10.10.0.1", "admin")
//!     .with_password("secret");
//!
//! let shell = SshShell::open(&target).await?;
//! let mut client = MikrotikClient::new(shell);
//!
//! let profiles = client.list_profiles().await?;
//! client.close().await?;
//! ```

pub mod config;
pub mod protocol;
pub mod transport;

// Re-exports
pub use config::MikrotikTarget;
pub use protocol::{MikrotikClient, SecretAction};
pub use transport::SshShell;

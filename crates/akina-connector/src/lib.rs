//! # Connector Framework
//!
//! Core abstractions for synchronizing akina customer state to remote
//! network devices.
//!
//! This crate provides the foundation shared by device connectors and the
//! provisioning engine:
//!
//! - [`error`] - Error taxonomy with fatal/per-customer classification
//! - [`config`] - Connection timeout settings
//! - [`traits`] - The [`CommandShell`](traits::CommandShell) transport seam
//!
//! Device connectors (e.g. the MikroTik SSH connector) implement
//! `CommandShell` over a real transport; tests implement it over scripted
//! replies. Everything above the seam only ever sees parsed results and
//! typed errors, never raw wire text.

pub mod config;
pub mod error;
pub mod traits;

/// Prelude module for convenient imports.
///
/// ```
/// use akina_connector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ConnectionSettings;
    pub use crate::error::{ConnectorError, ConnectorResult};
    pub use crate::traits::CommandShell;
}

// Re-export async_trait for shell implementors
pub use async_trait::async_trait;

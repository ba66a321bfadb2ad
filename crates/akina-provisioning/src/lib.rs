//! # Provisioning Engine
//!
//! Billing-driven synchronization of akina customers to router PPPoE
//! secrets.
//!
//! This crate provides the engine above the device connector:
//!
//! - [`billing`] - Derived payment verdict (`current` / `overdue`) from a
//!   customer's invoice history
//! - [`customer`] - Plain-data input records (customer, plan, invoice)
//! - [`reconciler`] - Per-customer target-state decision and convergence
//! - [`runner`] - Batch runs: one session, input order, one outcome per
//!   customer, failure isolation
//! - [`outcome`] - Typed outcomes and run reports
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐     ┌────────────┐     ┌─────────────────┐     ┌────────┐
//! │ SyncRunner │────►│ Reconciler │────►│ MikrotikClient  │────►│ router │
//! │ (batch)    │     │ (decide)   │     │ (render/decode) │     │ (SSH)  │
//! └────────────┘     └────────────┘     └─────────────────┘     └────────┘
//! ```
//!
//! Responses flow back as parsed booleans/lists/errors, never raw text,
//! past the protocol adapter.
//!
//! ## Example
//!
//! ```ignore
//! use akina_connector_mikrotik::MikrotikTarget;
//! use akina_provisioning::{SyncRunner, SyncSettings};
//!
//! let target = MikrotikTarget::new("North Coverage", "10.10.0.1", "admin")
//!     .with_password("secret");
//!
//! let runner = SyncRunner::new(SyncSettings::new("pppoe123"));
//! let report = runner.run_target(&target, &customers).await?;
//!
//! for outcome in &report.outcomes {
//!     println!("{outcome}");
//! }
//! ```

pub mod billing;
pub mod customer;
pub mod outcome;
pub mod reconciler;
pub mod runner;

// Re-exports for convenience
pub use billing::{BillingStatus, InvoiceStatus};
pub use customer::{CustomerRecord, Invoice, ServicePlan};
pub use outcome::{RunSummary, SyncAction, SyncOutcome, SyncReport};
pub use reconciler::{Reconciler, SyncSettings};
pub use runner::SyncRunner;

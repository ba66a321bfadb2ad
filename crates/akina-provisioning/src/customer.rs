//! Customer input records.
//!
//! The engine consumes customers as plain data assembled by the (out of
//! scope) persistence layer: one record per customer with its service plan
//! and invoice history already attached.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::InvoiceStatus;

/// One invoice, reduced to the fields the overdue verdict needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice lifecycle status.
    pub status: InvoiceStatus,
    /// Payment due date.
    pub due_date: NaiveDate,
}

impl Invoice {
    /// Create an invoice.
    pub fn new(status: InvoiceStatus, due_date: NaiveDate) -> Self {
        Self { status, due_date }
    }
}

/// The internet plan a customer subscribes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePlan {
    /// Plan display name (e.g. "Fiber 50").
    pub name: String,

    /// PPPoE profile configured on the router for this plan.
    ///
    /// `None` (or empty) is a data-configuration gap: the plan cannot be
    /// provisioned until an operator maps it to a device profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mikrotik_profile: Option<String>,
}

impl ServicePlan {
    /// Create a plan with a profile mapping.
    pub fn new(name: impl Into<String>, mikrotik_profile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mikrotik_profile: Some(mikrotik_profile.into()),
        }
    }

    /// Create a plan with no profile mapping.
    pub fn unmapped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mikrotik_profile: None,
        }
    }

    /// Get the profile mapping, treating an empty string as absent.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.mikrotik_profile
            .as_deref()
            .filter(|profile| !profile.is_empty())
    }
}

/// One customer with the data a sync run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Stable customer identifier.
    pub id: Uuid,

    /// Account number (e.g. "AKINA-20240318-0001"). Stable, unlike the
    /// display name; carried as the migration path for the secret key.
    pub account_no: String,

    /// Customer display name.
    pub name: String,

    /// Subscribed plan.
    pub plan: ServicePlan,

    /// Invoice history, scanned for the overdue verdict.
    pub invoices: Vec<Invoice>,
}

impl CustomerRecord {
    /// The device-side secret name for this customer.
    ///
    /// The display name is the natural key the router knows; two customers
    /// with identical names are indistinguishable on the device. Keying by
    /// `account_no` instead would fix that but breaks compatibility with
    /// secrets already provisioned under display names.
    #[must_use]
    pub fn secret_name(&self) -> &str {
        &self.name
    }
}

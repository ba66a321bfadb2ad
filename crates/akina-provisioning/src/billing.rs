//! Billing-status evaluation.
//!
//! The verdict is derived, never stored: every sync run re-scans the
//! customer's invoices, so a payment recorded between runs is picked up on
//! the next pass without any state to invalidate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::customer::Invoice;

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Issued, awaiting payment.
    Pending,
    /// Paid in full.
    Paid,
    /// Flagged overdue by the billing layer.
    Overdue,
}

impl InvoiceStatus {
    /// Convert to string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(format!("Unknown invoice status: {s}")),
        }
    }
}

/// Payment verdict for one customer, recomputed every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    /// No pending invoice is past due; service stays enabled.
    Current,
    /// At least one pending invoice is past due; service is cut.
    Overdue,
}

impl BillingStatus {
    /// Evaluate a customer's invoices against a reference date.
    ///
    /// A customer is overdue iff any `pending` invoice's due date has
    /// passed; the first match short-circuits the scan. Only `pending`
    /// participates: a `paid` invoice is settled regardless of its date,
    /// and an invoice already flagged `overdue` upstream has been taken
    /// over by the billing layer's own escalation.
    ///
    /// An invoice is past due from the start of its due date (the payment
    /// cutoff is midnight), so `due_date == today` already counts.
    #[must_use]
    pub fn evaluate(invoices: &[Invoice], today: NaiveDate) -> Self {
        for invoice in invoices {
            if invoice.status == InvoiceStatus::Pending && invoice.due_date <= today {
                return BillingStatus::Overdue;
            }
        }
        BillingStatus::Current
    }

    /// Convert to string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingStatus::Current => "current",
            BillingStatus::Overdue => "overdue",
        }
    }

    /// Check if service should be cut for this verdict.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        matches!(self, BillingStatus::Overdue)
    }
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Per-customer sync outcomes and run reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use akina_connector::error::ConnectorError;
use akina_connector_mikrotik::SecretAction;

use crate::customer::CustomerRecord;

/// What a reconciliation attempt did for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// Secret did not exist and was created.
    Created,
    /// Secret existed and was enabled with the plan's profile.
    Enabled,
    /// Secret existed and was disabled for non-payment.
    Disabled,
    /// Nothing to do (overdue customer with no secret on the device).
    Skipped,
    /// Reconciliation failed; see the outcome's error code and detail.
    Failed,
}

impl SyncAction {
    /// Convert to string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncAction::Created => "created",
            SyncAction::Enabled => "enabled",
            SyncAction::Disabled => "disabled",
            SyncAction::Skipped => "skipped",
            SyncAction::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SyncAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(SyncAction::Created),
            "enabled" => Ok(SyncAction::Enabled),
            "disabled" => Ok(SyncAction::Disabled),
            "skipped" => Ok(SyncAction::Skipped),
            "failed" => Ok(SyncAction::Failed),
            _ => Err(format!("Unknown sync action: {s}")),
        }
    }
}

/// Result of one reconciliation attempt for one customer.
///
/// Transient: produced by the reconciler, aggregated by the runner,
/// consumed for reporting. Never persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Customer this outcome belongs to.
    pub customer_id: Uuid,

    /// Device-side secret name (the customer display name).
    pub secret_name: String,

    /// What happened.
    pub action: SyncAction,

    /// Human-readable description, suitable for direct display.
    pub detail: String,

    /// Error classification code when `action` is `Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl SyncOutcome {
    /// Secret was created with the plan's profile.
    pub fn created(customer: &CustomerRecord, profile: &str) -> Self {
        Self {
            customer_id: customer.id,
            secret_name: customer.secret_name().to_string(),
            action: SyncAction::Created,
            detail: format!("created PPPoE secret with profile {profile}"),
            error_code: None,
        }
    }

    /// Secret was enabled and its profile set.
    pub fn enabled(customer: &CustomerRecord, profile: &str) -> Self {
        Self {
            customer_id: customer.id,
            secret_name: customer.secret_name().to_string(),
            action: SyncAction::Enabled,
            detail: format!("enabled PPPoE secret with profile {profile}"),
            error_code: None,
        }
    }

    /// Build a created/enabled outcome from the adapter's upsert branch.
    pub fn from_upsert(customer: &CustomerRecord, profile: &str, action: SecretAction) -> Self {
        match action {
            SecretAction::Created => Self::created(customer, profile),
            SecretAction::Enabled => Self::enabled(customer, profile),
        }
    }

    /// Secret was disabled for an overdue pending invoice.
    pub fn disabled(customer: &CustomerRecord) -> Self {
        Self {
            customer_id: customer.id,
            secret_name: customer.secret_name().to_string(),
            action: SyncAction::Disabled,
            detail: "disabled PPPoE secret due to overdue pending invoice".to_string(),
            error_code: None,
        }
    }

    /// Overdue customer with nothing to disable.
    pub fn skipped(customer: &CustomerRecord) -> Self {
        Self {
            customer_id: customer.id,
            secret_name: customer.secret_name().to_string(),
            action: SyncAction::Skipped,
            detail: "overdue but no PPPoE secret exists; nothing to disable".to_string(),
            error_code: None,
        }
    }

    /// Reconciliation failed with the given error.
    pub fn failed(customer: &CustomerRecord, error: &ConnectorError) -> Self {
        Self {
            customer_id: customer.id,
            secret_name: customer.secret_name().to_string(),
            action: SyncAction::Failed,
            detail: error.to_string(),
            error_code: Some(error.error_code().to_string()),
        }
    }

    /// Check if this outcome is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.action == SyncAction::Failed
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.secret_name, self.action, self.detail)
    }
}

/// Per-action counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub created: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// All outcomes of one batch sync run, in input customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// One outcome per input customer, order-preserving.
    pub outcomes: Vec<SyncOutcome>,

    /// When the run started (also the billing reference date).
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,
}

impl SyncReport {
    /// Compute per-action counts.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            total: self.outcomes.len(),
            ..RunSummary::default()
        };

        for outcome in &self.outcomes {
            match outcome.action {
                SyncAction::Created => summary.created += 1,
                SyncAction::Enabled => summary.enabled += 1,
                SyncAction::Disabled => summary.disabled += 1,
                SyncAction::Skipped => summary.skipped += 1,
                SyncAction::Failed => summary.failed += 1,
            }
        }

        summary
    }

    /// Check if every customer reconciled without failure.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|outcome| !outcome.is_failure())
    }
}

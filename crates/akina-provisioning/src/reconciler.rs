//! Per-customer device-state reconciliation.
//!
//! Stateless decision, re-evaluated every run:
//!
//! - overdue: secret disabled (only if one exists; otherwise skipped)
//! - current: secret enabled with the plan's profile (create if absent)
//!
//! Errors never cross this boundary: every failure becomes that customer's
//! `Failed` outcome so one bad customer cannot abort a batch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use akina_connector::error::{ConnectorError, ConnectorResult};
use akina_connector::traits::CommandShell;
use akina_connector_mikrotik::MikrotikClient;

use crate::billing::BillingStatus;
use crate::customer::CustomerRecord;
use crate::outcome::SyncOutcome;

/// Engine-level sync settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Shared password assigned to newly created PPPoE secrets.
    pub pppoe_password: String,
}

impl SyncSettings {
    /// Create settings with the shared PPPoE password.
    pub fn new(pppoe_password: impl Into<String>) -> Self {
        Self {
            pppoe_password: pppoe_password.into(),
        }
    }
}

impl std::fmt::Debug for SyncSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncSettings")
            .field("pppoe_password", &"***REDACTED***")
            .finish()
    }
}

/// Decides and applies the target secret state for one customer.
#[derive(Debug, Clone)]
pub struct Reconciler {
    settings: SyncSettings,
}

impl Reconciler {
    /// Create a reconciler.
    pub fn new(settings: SyncSettings) -> Self {
        Self { settings }
    }

    /// Reconcile one customer against the device.
    ///
    /// Always returns an outcome; adapter and data errors are converted to
    /// `Failed` here rather than propagated.
    #[instrument(skip_all, fields(customer = %customer.name))]
    pub async fn reconcile<S: CommandShell>(
        &self,
        client: &mut MikrotikClient<S>,
        customer: &CustomerRecord,
        today: NaiveDate,
    ) -> SyncOutcome {
        let billing = BillingStatus::evaluate(&customer.invoices, today);

        match self.apply(client, customer, billing).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    customer = %customer.name,
                    error = %error,
                    error_code = error.error_code(),
                    "reconciliation failed"
                );
                SyncOutcome::failed(customer, &error)
            }
        }
    }

    async fn apply<S: CommandShell>(
        &self,
        client: &mut MikrotikClient<S>,
        customer: &CustomerRecord,
        billing: BillingStatus,
    ) -> ConnectorResult<SyncOutcome> {
        let name = customer.secret_name();

        if billing.is_overdue() {
            if client.secret_exists(name).await? {
                client.disable_secret(name).await?;
                Ok(SyncOutcome::disabled(customer))
            } else {
                Ok(SyncOutcome::skipped(customer))
            }
        } else {
            // A plan without a profile mapping is a data-configuration gap,
            // reported before any command is issued.
            let profile = customer
                .plan
                .profile()
                .ok_or_else(|| ConnectorError::missing_profile(&customer.plan.name))?;

            let action = client
                .upsert_secret(name, profile, &self.settings.pppoe_password)
                .await?;

            Ok(SyncOutcome::from_upsert(customer, profile, action))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_debug_hides_password() {
        let settings = SyncSettings::new("pppoe123");
        let rendered = format!("{settings:?}");

        assert!(!rendered.contains("pppoe123"));
        assert!(rendered.contains("***REDACTED***"));
    }
}

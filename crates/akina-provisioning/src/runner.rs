//! Batch sync runner.
//!
//! One session per run, customers processed strictly in input order, one
//! outcome per customer. Failure isolation is the defining contract: after
//! the session opens, nothing a single customer does can stop the batch.

use chrono::Utc;
use tracing::{info, instrument, warn};

use akina_connector::error::{ConnectorError, ConnectorResult};
use akina_connector::traits::CommandShell;
use akina_connector_mikrotik::{MikrotikClient, MikrotikTarget, SshShell};

use crate::customer::CustomerRecord;
use crate::outcome::{SyncAction, SyncReport};
use crate::reconciler::{Reconciler, SyncSettings};

/// Runs reconciliation across the customer population.
#[derive(Debug, Clone)]
pub struct SyncRunner {
    reconciler: Reconciler,
}

impl SyncRunner {
    /// Create a runner.
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            reconciler: Reconciler::new(settings),
        }
    }

    /// Open one session to the target and run the whole batch on it.
    ///
    /// Fails fast with the session-establishment error (and zero outcomes)
    /// if the target is inactive, misconfigured, unreachable, or rejects
    /// the credentials. Once the session is open the run always completes
    /// and returns one outcome per input customer.
    #[instrument(skip_all, fields(target = %target.name, customers = customers.len()))]
    pub async fn run_target(
        &self,
        target: &MikrotikTarget,
        customers: &[CustomerRecord],
    ) -> ConnectorResult<SyncReport> {
        if !target.is_active {
            return Err(ConnectorError::invalid_configuration(format!(
                "target '{}' is inactive",
                target.name
            )));
        }

        let shell = SshShell::open(target).await?;
        Ok(self.run(shell, customers).await)
    }

    /// Run the batch on an already-open shell.
    ///
    /// Takes ownership of the shell and releases it exactly once, after
    /// the last customer. Outcomes preserve input order.
    pub async fn run<S: CommandShell>(
        &self,
        shell: S,
        customers: &[CustomerRecord],
    ) -> SyncReport {
        let started_at = Utc::now();
        let today = started_at.date_naive();

        let mut client = MikrotikClient::new(shell);
        let mut outcomes = Vec::with_capacity(customers.len());

        for customer in customers {
            info!(customer = %customer.name, "processing customer");

            let outcome = self.reconciler.reconcile(&mut client, customer, today).await;

            match outcome.action {
                SyncAction::Disabled => warn!(outcome = %outcome, "customer disabled"),
                SyncAction::Failed => warn!(outcome = %outcome, "customer failed"),
                _ => info!(outcome = %outcome, "customer synced"),
            }

            outcomes.push(outcome);
        }

        if let Err(error) = client.close().await {
            warn!(error = %error, "failed to close session after sync run");
        }

        let report = SyncReport {
            outcomes,
            started_at,
            completed_at: Utc::now(),
        };

        info!(summary = ?report.summary(), "customer synchronization complete");
        report
    }

    /// Fetch the profile catalog from a target on demand.
    ///
    /// Opens a session, lists the PPPoE profiles, and releases the session
    /// on every exit path. An empty catalog is a valid result, not an
    /// error.
    #[instrument(skip_all, fields(target = %target.name))]
    pub async fn fetch_profiles(target: &MikrotikTarget) -> ConnectorResult<Vec<String>> {
        let shell = SshShell::open(target).await?;
        let mut client = MikrotikClient::new(shell);

        match client.list_profiles().await {
            Ok(profiles) => {
                if let Err(error) = client.close().await {
                    warn!(error = %error, "failed to close session after profile fetch");
                }
                Ok(profiles)
            }
            Err(error) => {
                if let Err(close_error) = client.close().await {
                    warn!(error = %close_error, "failed to close session after profile fetch error");
                }
                Err(error)
            }
        }
    }
}

//! Shared test fixtures: a scripted device stand-in and record builders.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use akina_connector::error::{ConnectorError, ConnectorResult};
use akina_connector::traits::CommandShell;
use akina_provisioning::{CustomerRecord, Invoice, InvoiceStatus, ServicePlan};

/// Device stand-in that asserts the exact command sequence and plays back
/// canned replies, the way a mock server stands in for a live endpoint.
pub struct ScriptedShell {
    script: VecDeque<(String, ConnectorResult<String>)>,
    close_count: Arc<AtomicUsize>,
}

impl ScriptedShell {
    pub fn new(script: Vec<(&str, ConnectorResult<String>)>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|(command, reply)| (command.to_string(), reply))
                .collect(),
            close_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle that observes how often the shell was closed, surviving the
    /// move of the shell into the runner.
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.close_count)
    }
}

#[async_trait]
impl CommandShell for ScriptedShell {
    async fn exec(&mut self, command: &str) -> ConnectorResult<String> {
        let (expected, reply) = self
            .script
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command: {command}"));
        assert_eq!(command, expected, "commands issued out of order");
        reply
    }

    async fn close(&mut self) -> ConnectorResult<()> {
        assert!(
            self.script.is_empty(),
            "shell closed with {} scripted commands unconsumed",
            self.script.len()
        );
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn ok(output: &str) -> ConnectorResult<String> {
    Ok(output.to_string())
}

pub fn execution_failed(command: &str) -> ConnectorResult<String> {
    Err(ConnectorError::execution_failed(command, "channel closed"))
}

pub fn command_timeout(command: &str) -> ConnectorResult<String> {
    Err(ConnectorError::command_timeout(command, 30))
}

/// A listing reply that echoes the secret row back.
pub fn secret_row(name: &str) -> ConnectorResult<String> {
    ok(&format!(r#" 0   name="{name}" service=pppoe"#))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn yesterday() -> NaiveDate {
    today() - Duration::days(1)
}

pub fn next_month() -> NaiveDate {
    today() + Duration::days(30)
}

pub fn pending(due_date: NaiveDate) -> Invoice {
    Invoice::new(InvoiceStatus::Pending, due_date)
}

pub fn paid(due_date: NaiveDate) -> Invoice {
    Invoice::new(InvoiceStatus::Paid, due_date)
}

pub fn customer(name: &str, profile: Option<&str>, invoices: Vec<Invoice>) -> CustomerRecord {
    let plan = match profile {
        Some(profile) => ServicePlan::new("Fiber 50", profile),
        None => ServicePlan::unmapped("Fiber 50"),
    };

    CustomerRecord {
        id: Uuid::new_v4(),
        account_no: format!("AKINA-20240318-{:04}", name.len()),
        name: name.to_string(),
        plan,
        invoices,
    }
}

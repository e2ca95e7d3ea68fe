//! Audit sinks receive each change result as it is produced.

use kev_types::apply::{ChangeResult, ChangeStatus};
use tracing::{debug, warn};

/// Destination for audit entries produced by an apply pass.
pub trait AuditSink {
    fn record(&mut self, result: &ChangeResult);
}

/// Emits audit entries as `tracing` events. Empty messages are not emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&mut self, result: &ChangeResult) {
        if result.message.is_empty() {
            return;
        }
        let kind = result.target.as_str();
        match result.status {
            ChangeStatus::Skipped => warn!(kind, op = %result.change_type, "{}", result.message),
            ChangeStatus::Applied | ChangeStatus::Noop => {
                debug!(kind, op = %result.change_type, "{}", result.message)
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AuditSink for NullSink {
    fn record(&mut self, _result: &ChangeResult) {}
}

impl AuditSink for Vec<ChangeResult> {
    fn record(&mut self, result: &ChangeResult) {
        self.push(result.clone());
    }
}

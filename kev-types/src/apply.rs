use crate::change::{ChangeType, Parent};
use serde::{Deserialize, Serialize};

/// Group a change belongs to within its changeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Version,
    Service,
    Volume,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Version => "version",
            TargetKind::Service => "service",
            TargetKind::Volume => "volume",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Applied,
    Skipped,
    Noop,
}

/// Outcome of one processed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeResult {
    pub target: TargetKind,
    pub change_type: ChangeType,

    #[serde(default)]
    pub parent: Parent,

    pub status: ChangeStatus,

    /// Audit message; empty for silent no-ops.
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSummary {
    pub processed: u64,
    pub applied: u64,
    pub skipped: u64,
    pub noop: u64,
}

impl PatchSummary {
    pub fn record(&mut self, status: ChangeStatus) {
        self.processed += 1;
        match status {
            ChangeStatus::Applied => self.applied += 1,
            ChangeStatus::Skipped => self.skipped += 1,
            ChangeStatus::Noop => self.noop += 1,
        }
    }
}

/// Everything an apply pass produced, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    #[serde(default)]
    pub results: Vec<ChangeResult>,
    pub summary: PatchSummary,
}

impl PatchReport {
    pub fn push(&mut self, result: ChangeResult) {
        self.summary.record(result.status);
        self.results.push(result);
    }

    /// Audit messages, one per processed change.
    pub fn messages(&self) -> Vec<String> {
        self.results.iter().map(|r| r.message.clone()).collect()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ChangeResult> {
        self.results
            .iter()
            .filter(|r| r.status == ChangeStatus::Skipped)
    }
}

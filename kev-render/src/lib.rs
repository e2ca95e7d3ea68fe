//! Rendering helpers (markdown) for human-readable changesets and patch reports.

use kev_types::apply::{ChangeStatus, PatchReport};
use kev_types::{Change, Changeset, Parent};

pub fn render_changeset_md(changeset: &Changeset) -> String {
    let mut out = String::new();
    out.push_str("# kev changeset\n\n");
    out.push_str(&format!(
        "- Version change: {}\n- Service changes: {}\n- Volume changes: {}\n\n",
        if changeset.version.is_some() { "yes" } else { "no" },
        changeset.services.len(),
        changeset.volumes.len()
    ));

    if !changeset.has_pending_changes() {
        out.push_str("_No pending changes._\n");
        return out;
    }

    out.push_str("## Changes\n\n");
    for (i, change) in changeset.changes().into_iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, describe(change)));
    }

    out
}

fn describe(change: &Change) -> String {
    let mut s = format!("`{}`", change.change_type);
    if change.parent != Parent::Unscoped {
        s.push_str(&format!(" {}", change.parent.as_str()));
    }
    if !change.target.is_empty() {
        s.push_str(&format!(" `{}`", change.target));
    }
    if let Some(index) = &change.index {
        s.push_str(&format!(" on {}", index));
    }
    s.push_str(&format!(" ({} payload)", change.value.kind()));
    s
}

pub fn render_report_md(report: &PatchReport) -> String {
    let mut out = String::new();
    out.push_str("# kev patch\n\n");
    out.push_str(&format!(
        "- Processed: {}\n- Applied: {}\n- Skipped: {}\n- No-op: {}\n\n",
        report.summary.processed,
        report.summary.applied,
        report.summary.skipped,
        report.summary.noop
    ));

    out.push_str("## Results\n\n");
    if report.results.is_empty() {
        out.push_str("_No results._\n");
        return out;
    }

    for (i, r) in report.results.iter().enumerate() {
        out.push_str(&format!(
            "{}. `{}` {} {}",
            i + 1,
            status_label(r.status),
            r.target.as_str(),
            r.change_type
        ));
        if !r.message.is_empty() {
            out.push_str(&format!(": {}", r.message));
        }
        out.push('\n');
    }

    out
}

fn status_label(s: ChangeStatus) -> &'static str {
    match s {
        ChangeStatus::Applied => "applied",
        ChangeStatus::Skipped => "skipped",
        ChangeStatus::Noop => "noop",
    }
}

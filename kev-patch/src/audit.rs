//! Audit message construction. Pure functions; emission is the sink's job.

use crate::error::SkipReason;
use kev_types::ChangeType;
use kev_types::apply::TargetKind;

pub fn version_updated(from: &str, to: &str) -> String {
    format!("version {from} updated to {to}")
}

pub fn service_added(name: &str) -> String {
    format!("added service: {name}")
}

pub fn service_removed(name: &str) -> String {
    format!("removed service: {name}")
}

pub fn env_var_removed(key: &str, service: &str) -> String {
    format!("removed env var: {key} from service {service}")
}

pub fn label_updated(service: &str, key: &str, from: &str, to: &str) -> String {
    format!("service [{service}], label [{key}] updated, from:[{from}] to:[{to}]")
}

pub fn extensions_updated(
    service: &str,
    value: &serde_json::Map<String, serde_json::Value>,
) -> String {
    let rendered = serde_json::to_string(value).unwrap_or_default();
    format!("service [{service}] extensions updated to {rendered}")
}

pub fn volume_added(name: &str) -> String {
    format!("added volume: {name}")
}

pub fn volume_removed(name: &str) -> String {
    format!("removed volume: {name}")
}

pub fn skipped(target: TargetKind, change_type: ChangeType, reason: &SkipReason) -> String {
    format!("skipped {} {change_type} change: {reason}", target.as_str())
}

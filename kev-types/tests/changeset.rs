use kev_types::apply::{ChangeResult, ChangeStatus, PatchReport, TargetKind};
use kev_types::{
    Change, ChangeIndex, ChangeType, ChangeValue, Changeset, ChangesetError, Parent, ServiceConfig,
    VolumeConfig,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn empty_changeset_has_no_pending_changes() {
    let cset = Changeset::default();
    assert!(cset.changes().is_empty());
    assert!(!cset.has_pending_changes());
    assert!(cset.is_empty());
}

#[test]
fn changes_flatten_version_then_services_then_volumes() {
    let cset = Changeset {
        version: Some(Change::version_update("3.8")),
        services: vec![Change::service_delete(0), Change::service_delete(2)],
        volumes: vec![Change::volume_delete("db")],
    };

    let flat = cset.changes();
    assert_eq!(flat.len(), 4);
    assert_eq!(cset.len(), 4);
    assert_eq!(flat[0], &Change::version_update("3.8"));
    assert_eq!(flat[1].index, Some(ChangeIndex::Service(0)));
    assert_eq!(flat[2].index, Some(ChangeIndex::Service(2)));
    assert_eq!(flat[3].index, Some(ChangeIndex::Volume("db".to_string())));
}

#[test]
fn version_only_changeset_is_pending() {
    let cset = Changeset {
        version: Some(Change::new(ChangeType::Delete, Parent::Unscoped)),
        ..Changeset::default()
    };
    assert!(cset.has_pending_changes());
    assert_eq!(cset.changes().len(), 1);
}

#[test]
fn builder_rejects_second_version_change() {
    let err = Changeset::builder()
        .version(Change::version_update("3.7"))
        .service(Change::service_delete(0))
        .version(Change::version_update("3.8"))
        .build()
        .unwrap_err();
    assert_eq!(err, ChangesetError::DuplicateVersionChange);
}

#[test]
fn builder_keeps_listed_order() {
    let cset = Changeset::builder()
        .service(Change::service_create(ServiceConfig::new("web")))
        .volume(Change::volume_create("data", VolumeConfig::default()))
        .service(Change::service_label_update(0, "kev.workload.replicas", "3"))
        .build()
        .expect("build");

    assert!(cset.version.is_none());
    assert_eq!(cset.services.len(), 2);
    assert_eq!(cset.services[0].change_type, ChangeType::Create);
    assert_eq!(cset.services[1].parent, Parent::Labels);
    assert_eq!(cset.volumes.len(), 1);
}

#[test]
fn changeset_decodes_from_json() {
    let raw = serde_json::json!({
        "version": { "type": "update", "value": { "kind": "string", "value": "3.8" } },
        "services": [
            { "type": "delete", "parent": "environment", "target": "DEBUG", "index": { "service": 1 } },
            { "type": "update", "parent": "extensions", "index": { "service": 0 },
              "value": { "kind": "map", "value": { "workload": { "replicas": 2 } } } }
        ],
        "volumes": [
            { "type": "delete", "index": { "volume": "db" } }
        ]
    });

    let cset: Changeset = serde_json::from_value(raw).expect("decode");
    assert_eq!(
        cset.version.as_ref().map(|c| c.value.clone()),
        Some(ChangeValue::from("3.8"))
    );
    assert_eq!(cset.services[0], Change::service_env_delete(1, "DEBUG"));
    assert!(cset.services[1].value.as_map().is_ok());
    assert_eq!(cset.volumes[0], Change::volume_delete("db"));
}

#[test]
fn report_counts_statuses_and_keeps_message_order() {
    let mut report = PatchReport::default();
    for (status, message) in [
        (ChangeStatus::Applied, "version 1.0 updated to 3.8"),
        (ChangeStatus::Noop, ""),
        (ChangeStatus::Skipped, "skipped service change: missing index"),
    ] {
        report.push(ChangeResult {
            target: TargetKind::Service,
            change_type: ChangeType::Update,
            parent: Parent::Unscoped,
            status,
            message: message.to_string(),
        });
    }

    assert_eq!(report.summary.processed, 3);
    assert_eq!(report.summary.applied, 1);
    assert_eq!(report.summary.noop, 1);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.messages()[1], "");
    assert_eq!(report.skipped().count(), 1);
}

fn arb_change() -> impl Strategy<Value = Change> {
    prop_oneof![
        (0usize..8).prop_map(Change::service_delete),
        "[a-z]{1,6}".prop_map(Change::volume_delete),
        "[0-9]\\.[0-9]".prop_map(Change::version_update),
    ]
}

proptest! {
    #[test]
    fn pending_iff_flattened_list_non_empty(
        version in proptest::option::of(arb_change()),
        services in prop::collection::vec(arb_change(), 0..4),
        volumes in prop::collection::vec(arb_change(), 0..4),
    ) {
        let any_set = version.is_some() || !services.is_empty() || !volumes.is_empty();
        let cset = Changeset { version, services, volumes };
        prop_assert_eq!(cset.changes().is_empty(), !cset.has_pending_changes());
        prop_assert_eq!(cset.has_pending_changes(), any_set);
        prop_assert_eq!(cset.changes().len(), cset.len());
    }
}

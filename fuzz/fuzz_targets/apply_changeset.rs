#![no_main]

use kev_labels::LabelTables;
use kev_patch::{NullSink, apply_changeset};
use kev_types::{Changeset, ComposeOverride, ServiceConfig, VolumeConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any changeset that decodes must apply without panicking, one result per change.
    let Ok(cset) = serde_json::from_slice::<Changeset>(data) else { return };
    let expected = cset.len();

    let mut doc = ComposeOverride::new("3.8");
    for name in ["web", "db", "cache"] {
        doc.services
            .push(ServiceConfig::new(name).with_env("DEBUG", "1").with_label("team", "core"));
    }
    doc.volumes.insert("data".to_string(), VolumeConfig::default());

    let report = apply_changeset(cset, &mut doc, &LabelTables::default(), &mut NullSink);
    assert_eq!(report.results.len(), expected);
});

//! Apply engine for kev changesets.
//!
//! Responsibilities:
//! - Apply a [`Changeset`] to a [`ComposeOverride`] in place: version first, then services, then
//!   volumes, each group in listed order.
//! - Skip a change whose payload or reference does not fit, record a diagnostic, and carry on.
//!   A pass never fails as a whole.
//! - Hand every change result to an [`AuditSink`].

pub mod audit;
pub mod error;
mod positions;
pub mod sink;

pub use error::{PatchError, PatchResult, SkipReason};
pub use sink::{AuditSink, NullSink, TracingSink};

use camino::Utf8Path;
use kev_labels::{LabelTables, condense_labels};
use kev_types::apply::{ChangeResult, ChangeStatus, PatchReport, TargetKind};
use kev_types::{
    Change, ChangeIndex, ChangeType, Changeset, ChangesetBuilder, ComposeOverride,
    K8S_EXTENSION_KEY, Parent,
};
use positions::ServicePositions;
use std::collections::BTreeMap;
use tracing::debug;

/// Applies changesets using a fixed set of base label tables.
#[derive(Debug, Clone, Default)]
pub struct Patcher {
    tables: LabelTables,
}

impl Patcher {
    pub fn new(tables: LabelTables) -> Self {
        Self { tables }
    }

    /// Patcher configured from `kev.toml` in `root`, or the built-in tables if there is none.
    pub fn from_root(root: &Utf8Path) -> PatchResult<Self> {
        let config = kev_labels::config::load_or_default(root)?;
        Ok(Self::new(config.label_tables()))
    }

    pub fn tables(&self) -> &LabelTables {
        &self.tables
    }

    pub fn apply(
        &self,
        changeset: Changeset,
        doc: &mut ComposeOverride,
        sink: &mut dyn AuditSink,
    ) -> PatchReport {
        apply_changeset(changeset, doc, &self.tables, sink)
    }

    /// Build and apply in one step. A malformed changeset is rejected before `doc` is touched.
    pub fn apply_built(
        &self,
        builder: ChangesetBuilder,
        doc: &mut ComposeOverride,
        sink: &mut dyn AuditSink,
    ) -> PatchResult<PatchReport> {
        let changeset = builder.build()?;
        Ok(self.apply(changeset, doc, sink))
    }
}

/// Apply `changeset` to `doc` and return the audit messages, one per processed change.
///
/// Messages are also emitted as `tracing` events.
pub fn apply(changeset: Changeset, doc: &mut ComposeOverride, tables: &LabelTables) -> Vec<String> {
    apply_changeset(changeset, doc, tables, &mut TracingSink).messages()
}

/// Apply `changeset` to `doc`, handing each change result to `sink`.
pub fn apply_changeset(
    changeset: Changeset,
    doc: &mut ComposeOverride,
    tables: &LabelTables,
    sink: &mut dyn AuditSink,
) -> PatchReport {
    debug!(changes = changeset.len(), "applying changeset");

    let Changeset {
        version,
        services,
        volumes,
    } = changeset;

    let mut pass = Pass {
        doc,
        tables,
        positions: ServicePositions::default(),
    };
    let mut report = PatchReport::default();

    let groups = [
        (TargetKind::Version, Vec::from_iter(version)),
        (TargetKind::Service, services),
        (TargetKind::Volume, volumes),
    ];
    for (target, changes) in groups {
        for change in changes {
            let change_type = change.change_type;
            let parent = change.parent;
            let outcome = match target {
                TargetKind::Version => pass.patch_version(change),
                TargetKind::Service => pass.patch_service(change),
                TargetKind::Volume => pass.patch_volume(change),
            };

            let result = match outcome {
                Ok(Outcome { status, message }) => ChangeResult {
                    target,
                    change_type,
                    parent,
                    status,
                    message,
                },
                Err(reason) => ChangeResult {
                    target,
                    change_type,
                    parent,
                    status: ChangeStatus::Skipped,
                    message: audit::skipped(target, change_type, &reason),
                },
            };
            sink.record(&result);
            report.push(result);
        }
    }

    debug!(
        applied = report.summary.applied,
        skipped = report.summary.skipped,
        noop = report.summary.noop,
        "changeset applied"
    );
    report
}

struct Outcome {
    status: ChangeStatus,
    message: String,
}

impl Outcome {
    fn applied(message: String) -> Self {
        Self {
            status: ChangeStatus::Applied,
            message,
        }
    }

    fn noop() -> Self {
        Self {
            status: ChangeStatus::Noop,
            message: String::new(),
        }
    }
}

struct Pass<'a> {
    doc: &'a mut ComposeOverride,
    tables: &'a LabelTables,
    positions: ServicePositions,
}

impl Pass<'_> {
    fn patch_version(&mut self, change: Change) -> Result<Outcome, SkipReason> {
        if change.change_type != ChangeType::Update {
            return Ok(Outcome::noop());
        }

        let new = change.value.as_string()?.to_string();
        let pre = std::mem::replace(&mut self.doc.version, new);
        Ok(Outcome::applied(audit::version_updated(
            &pre,
            &self.doc.version,
        )))
    }

    fn patch_service(&mut self, change: Change) -> Result<Outcome, SkipReason> {
        match (change.change_type, change.parent) {
            (ChangeType::Create, _) => {
                let mut svc = change.value.into_service()?;
                svc.labels = condense_labels(&svc.labels, &self.tables.service);
                let message = audit::service_added(&svc.name);
                self.doc.services.push(svc);
                Ok(Outcome::applied(message))
            }

            (ChangeType::Delete, Parent::Environment) => {
                let (_, pos) = self.service_position(&change)?;
                let svc = &mut self.doc.services[pos];
                if svc.environment.remove(&change.target).is_none() {
                    return Err(SkipReason::EnvVarNotFound {
                        key: change.target,
                        service: svc.name.clone(),
                    });
                }
                Ok(Outcome::applied(audit::env_var_removed(
                    &change.target,
                    &svc.name,
                )))
            }

            (ChangeType::Delete, Parent::Unscoped) => {
                let (index, pos) = self.service_position(&change)?;
                let removed = self.doc.services.remove(pos);
                self.positions.mark_removed(index);
                Ok(Outcome::applied(audit::service_removed(&removed.name)))
            }

            (ChangeType::Update, Parent::Labels) => {
                let (_, pos) = self.service_position(&change)?;
                let value = change.value.as_string()?;
                let svc = &mut self.doc.services[pos];
                // Only overwrites are audited; a newly added label is silent.
                let message = match svc.labels.insert(change.target.clone(), value.to_string()) {
                    Some(pre) => audit::label_updated(&svc.name, &change.target, &pre, value),
                    None => String::new(),
                };
                Ok(Outcome::applied(message))
            }

            (ChangeType::Update, Parent::Extensions) => {
                let (_, pos) = self.service_position(&change)?;
                let value = change.value.as_map()?;
                let svc = &mut self.doc.services[pos];
                svc.extensions.get_or_insert_with(BTreeMap::new).insert(
                    K8S_EXTENSION_KEY.to_string(),
                    serde_json::Value::Object(value.clone()),
                );
                Ok(Outcome::applied(audit::extensions_updated(&svc.name, value)))
            }

            _ => Ok(Outcome::noop()),
        }
    }

    fn patch_volume(&mut self, change: Change) -> Result<Outcome, SkipReason> {
        let Change {
            change_type,
            index,
            value,
            ..
        } = change;

        match change_type {
            ChangeType::Create => {
                let name = volume_name(index)?;
                let mut vol = value.into_volume()?;
                vol.labels = condense_labels(&vol.labels, &self.tables.volume);
                let message = audit::volume_added(&name);
                self.doc.volumes.insert(name, vol);
                Ok(Outcome::applied(message))
            }
            ChangeType::Delete => {
                let name = volume_name(index)?;
                if self.doc.volumes.remove(&name).is_none() {
                    return Err(SkipReason::VolumeNotFound { name });
                }
                Ok(Outcome::applied(audit::volume_removed(&name)))
            }
            ChangeType::Update => Err(SkipReason::Unsupported {
                target: TargetKind::Volume,
                change_type,
            }),
        }
    }

    /// Original and current position of the service a change addresses.
    fn service_position(&self, change: &Change) -> Result<(usize, usize), SkipReason> {
        let index = match &change.index {
            Some(ChangeIndex::Service(index)) => *index,
            Some(ChangeIndex::Volume(_)) => {
                return Err(SkipReason::WrongIndexKind {
                    expected: TargetKind::Service,
                });
            }
            None => return Err(SkipReason::MissingIndex),
        };
        let pos = self.positions.resolve(index, self.doc.services.len())?;
        Ok((index, pos))
    }
}

fn volume_name(index: Option<ChangeIndex>) -> Result<String, SkipReason> {
    match index {
        Some(ChangeIndex::Volume(name)) => Ok(name),
        Some(ChangeIndex::Service(_)) => Err(SkipReason::WrongIndexKind {
            expected: TargetKind::Volume,
        }),
        None => Err(SkipReason::MissingIndex),
    }
}

use crate::change::Change;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered batch of pending changes, partitioned by target kind.
///
/// A changeset is applied once and then discarded; it is not reusable or invertible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Changeset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Change>,

    #[serde(default)]
    pub services: Vec<Change>,

    #[serde(default)]
    pub volumes: Vec<Change>,
}

impl Changeset {
    pub fn builder() -> ChangesetBuilder {
        ChangesetBuilder::default()
    }

    /// All changes in apply order: version, then services, then volumes.
    pub fn changes(&self) -> Vec<&Change> {
        self.version
            .iter()
            .chain(self.services.iter())
            .chain(self.volumes.iter())
            .collect()
    }

    pub fn has_pending_changes(&self) -> bool {
        self.version.is_some() || !self.services.is_empty() || !self.volumes.is_empty()
    }

    pub fn len(&self) -> usize {
        usize::from(self.version.is_some()) + self.services.len() + self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_pending_changes()
    }
}

/// Structural problems detected while assembling a changeset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangesetError {
    #[error("changeset already has a version change")]
    DuplicateVersionChange,
}

/// Upstream construction path for changesets.
///
/// Rejects structurally malformed batches; per-change shape checks are left to the applier.
#[derive(Debug, Default)]
pub struct ChangesetBuilder {
    version: Option<Change>,
    services: Vec<Change>,
    volumes: Vec<Change>,
    duplicate_version: bool,
}

impl ChangesetBuilder {
    pub fn version(mut self, change: Change) -> Self {
        if self.version.is_some() {
            self.duplicate_version = true;
        } else {
            self.version = Some(change);
        }
        self
    }

    pub fn service(mut self, change: Change) -> Self {
        self.services.push(change);
        self
    }

    pub fn volume(mut self, change: Change) -> Self {
        self.volumes.push(change);
        self
    }

    pub fn build(self) -> Result<Changeset, ChangesetError> {
        if self.duplicate_version {
            return Err(ChangesetError::DuplicateVersionChange);
        }
        Ok(Changeset {
            version: self.version,
            services: self.services,
            volumes: self.volumes,
        })
    }
}

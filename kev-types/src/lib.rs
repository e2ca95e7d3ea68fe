//! Shared DTOs for the kev workspace.
//!
//! # Design constraints
//! - A [`Changeset`](changeset::Changeset) is data only. Consistency between a change's type,
//!   parent and payload is checked when it is applied, not when it is built.
//! - These types are serializable so changesets and reports can be handed between tools.
//! - Prefer adding optional fields over changing semantics.

pub mod apply;
pub mod change;
pub mod changeset;
pub mod document;

pub use change::{
    Change, ChangeIndex, ChangeType, ChangeValue, Parent, UnexpectedPayload, ValueKind,
};
pub use changeset::{Changeset, ChangesetBuilder, ChangesetError};
pub use document::{ComposeOverride, K8S_EXTENSION_KEY, ServiceConfig, VolumeConfig};

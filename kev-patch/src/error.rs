//! Error types for kev-patch.
//!
//! Two families:
//! - [`SkipReason`]: why a single change was skipped. Never escapes an apply pass; it is turned
//!   into a diagnostic audit entry and the pass continues.
//! - [`PatchError`]: failures of the surfaces around a pass (malformed changeset, config I/O).

use kev_types::apply::TargetKind;
use kev_types::{ChangeType, ChangesetError, UnexpectedPayload};
use thiserror::Error;

/// Why one change could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The payload shape does not match what the change type and parent require.
    #[error(transparent)]
    UnexpectedPayload(#[from] UnexpectedPayload),

    #[error("change has no index")]
    MissingIndex,

    /// A service change carried a volume name or the other way round.
    #[error("index does not address a {}", .expected.as_str())]
    WrongIndexKind { expected: TargetKind },

    #[error("service index {index} out of range (services: {len})")]
    ServiceOutOfRange { index: usize, len: usize },

    /// An earlier change in the same pass already removed this service.
    #[error("service index {index} was removed earlier in this pass")]
    ServiceAlreadyRemoved { index: usize },

    #[error("env var {key} not found in service {service}")]
    EnvVarNotFound { key: String, service: String },

    #[error("volume {name} not found")]
    VolumeNotFound { name: String },

    #[error("{} {} is not supported", .target.as_str(), .change_type)]
    Unsupported {
        target: TargetKind,
        change_type: ChangeType,
    },
}

/// The top-level error type for kev-patch entry points.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The changeset was rejected before any change was applied.
    #[error("malformed changeset: {0}")]
    Malformed(#[from] ChangesetError),

    /// A runtime error such as a config file that cannot be read or parsed.
    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

impl PatchError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, PatchError::Malformed(_))
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PatchError::Malformed(_) => 2,
            PatchError::Runtime(_) => 1,
        }
    }
}

/// Result type alias using PatchError.
pub type PatchResult<T> = Result<T, PatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kev_types::ValueKind;

    #[test]
    fn malformed_changeset_reports_exit_code_2() {
        let err = PatchError::from(ChangesetError::DuplicateVersionChange);
        assert!(err.is_malformed());
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("malformed changeset"));
    }

    #[test]
    fn runtime_error_reports_exit_code_1() {
        let err = PatchError::from(anyhow::anyhow!("boom"));
        assert!(!err.is_malformed());
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("runtime error"));
    }

    #[test]
    fn skip_reasons_render_their_details() {
        let payload = SkipReason::from(UnexpectedPayload {
            expected: ValueKind::Map,
            found: ValueKind::String,
        });
        assert_eq!(
            payload.to_string(),
            "unexpected payload kind: expected map, found string"
        );

        let wrong = SkipReason::WrongIndexKind {
            expected: TargetKind::Service,
        };
        assert_eq!(wrong.to_string(), "index does not address a service");

        let unsupported = SkipReason::Unsupported {
            target: TargetKind::Volume,
            change_type: ChangeType::Update,
        };
        assert_eq!(unsupported.to_string(), "volume update is not supported");
    }
}

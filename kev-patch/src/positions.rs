use crate::error::SkipReason;
use std::collections::BTreeSet;

/// Maps service positions as they were when a pass started onto current positions.
///
/// Changesets address services by the position they had before the pass. Removing a service
/// shifts everything after it, so each removal is recorded here and later indices are
/// translated before use.
#[derive(Debug, Default)]
pub(crate) struct ServicePositions {
    removed: BTreeSet<usize>,
}

impl ServicePositions {
    /// Current position of the service originally at `index`.
    pub(crate) fn resolve(&self, index: usize, len: usize) -> Result<usize, SkipReason> {
        if self.removed.contains(&index) {
            return Err(SkipReason::ServiceAlreadyRemoved { index });
        }
        let current = index - self.removed.range(..index).count();
        if current >= len {
            return Err(SkipReason::ServiceOutOfRange { index, len });
        }
        Ok(current)
    }

    pub(crate) fn mark_removed(&mut self, index: usize) {
        self.removed.insert(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_positions_resolve_to_themselves() {
        let positions = ServicePositions::default();
        assert_eq!(positions.resolve(2, 3), Ok(2));
        assert_eq!(
            positions.resolve(3, 3),
            Err(SkipReason::ServiceOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn removals_shift_later_positions() {
        let mut positions = ServicePositions::default();
        positions.mark_removed(1);

        assert_eq!(positions.resolve(0, 2), Ok(0));
        assert_eq!(positions.resolve(2, 2), Ok(1));
        assert_eq!(
            positions.resolve(1, 2),
            Err(SkipReason::ServiceAlreadyRemoved { index: 1 })
        );
    }
}

//! Component membership change computer.

use crate::diff::traits::{ChangeComputer, MembershipChangeSet};
use crate::model::ComponentIndex;

/// Finds components that exist on only one side.
#[derive(Debug, Clone, Copy, Default)]
pub struct MembershipChangeComputer;

impl MembershipChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChangeComputer for MembershipChangeComputer {
    type ChangeSet = MembershipChangeSet;

    fn compute(&self, old: &ComponentIndex, new: &ComponentIndex) -> MembershipChangeSet {
        MembershipChangeSet {
            added: new
                .records()
                .filter(|c| !old.contains(&c.identity_key))
                .cloned()
                .collect(),
            removed: old
                .records()
                .filter(|c| !new.contains(&c.identity_key))
                .cloned()
                .collect(),
        }
    }

    fn name(&self) -> &'static str {
        "MembershipChangeComputer"
    }
}

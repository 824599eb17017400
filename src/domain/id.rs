//! Typed handles for entities owned by a project
//!
//! Each handle is the entity's position in its project collection. Entities
//! are never removed, so a handle stays valid for the project's lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Creates a handle from a collection index
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the collection index
            pub fn index(&self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0 + 1)
            }
        }
    };
}

entity_id!(
    /// Handle to a task in the project's task arena
    TaskId,
    "t"
);
entity_id!(
    /// Handle to a team member
    MemberId,
    "m"
);
entity_id!(
    /// Handle to a risk
    RiskId,
    "r"
);
entity_id!(
    /// Handle to a milestone
    MilestoneId,
    "ms"
);
entity_id!(
    /// Handle to a change-log entry
    ChangeId,
    "c"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_based() {
        assert_eq!(TaskId::new(0).to_string(), "t-1");
        assert_eq!(MilestoneId::new(4).to_string(), "ms-5");
    }

    #[test]
    fn serializes_as_plain_index() {
        let json = serde_json::to_string(&TaskId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}

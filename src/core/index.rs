//! Dense index types for the enumerated universe.
//!
//! The universe builder assigns every state symbol and every action
//! symbol a dense integer in first-seen order. Learning code keys its
//! value tables on these integers, so they are newtyped to keep state
//! and action indices from mixing.
//!
//! ## Usage
//!
//! ```
//! use blocks_rl::core::{ActionId, StateId};
//!
//! let s = StateId::new(3);
//! let a = ActionId::new(0);
//!
//! assert_eq!(s.raw(), 3);
//! assert_eq!(a.raw(), 0);
//! ```

use serde::{Deserialize, Serialize};

/// Index of one world configuration in the enumerated state universe.
///
/// Dense, zero-based, assigned in the order the rule engine enumerates
/// configurations. Stable for the lifetime of one universe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub u32);

impl StateId {
    /// Create a state index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "State({})", self.0)
    }
}

/// Index of one parameterized action in the enumerated action universe.
///
/// Dense, zero-based, assigned in the order the rule engine enumerates
/// actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub u32);

impl ActionId {
    /// Create an action index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Action({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        assert_eq!(StateId::new(7).raw(), 7);
        assert_eq!(ActionId::new(11).raw(), 11);
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        assert!(StateId::new(0) < StateId::new(1));
        assert!(ActionId::new(2) > ActionId::new(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(StateId::new(4).to_string(), "State(4)");
        assert_eq!(ActionId::new(9).to_string(), "Action(9)");
    }
}

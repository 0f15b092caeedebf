//! Rule-engine boundary: protocol trait and action terms.
//!
//! The rule engine is an external collaborator. This module defines the
//! seam: the [`RuleEngine`] trait the environment drives, and the
//! structured [`ActionTerm`] records enumeration produces. The core
//! never interprets world-specific concepts beyond this boundary.

pub mod protocol;
pub mod term;

pub use protocol::RuleEngine;
pub use term::{ActionQuery, ActionTerm};

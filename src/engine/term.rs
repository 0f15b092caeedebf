//! Action terms: functor + ordered argument list.
//!
//! The rule engine describes a parameterized move as a functor name (the
//! "verb") plus an ordered argument list (the "nouns"), e.g.
//! `move(a, b, 2)`. The engine hands these over as structured records;
//! rendering them back into the engine's textual form is done in exactly
//! one place, [`ActionTerm::render`], so the string sent on a step query
//! is always byte-identical to the one the universe was keyed on.
//!
//! ## Example
//!
//! ```
//! use blocks_rl::engine::ActionTerm;
//!
//! let term = ActionTerm::new("move", &["a", "b", "2"]);
//! assert_eq!(term.render(), "move(a,b,2)");
//!
//! let nullary = ActionTerm::new("wait", &[]);
//! assert_eq!(nullary.render(), "wait");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A parameterized action as reported by the rule engine.
///
/// SmallVec optimizes for 0-3 arguments (the reference world's `move/3`)
/// without heap allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionTerm {
    /// The functor name (type of action).
    pub functor: String,

    /// Ordered arguments for this action.
    pub args: SmallVec<[String; 3]>,
}

impl ActionTerm {
    /// Create a term from a functor and argument list.
    #[must_use]
    pub fn new(functor: impl Into<String>, args: &[&str]) -> Self {
        Self {
            functor: functor.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Get the number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Render the canonical textual form.
    ///
    /// `functor(arg1,arg2,...)` with no spaces; bare `functor` when there
    /// are no arguments. This is the only rendering the crate ever uses,
    /// both when keying the action universe and when issuing step
    /// queries.
    #[must_use]
    pub fn render(&self) -> String {
        if self.args.is_empty() {
            return self.functor.clone();
        }

        let mut out = String::with_capacity(
            self.functor.len() + 2 + self.args.iter().map(|a| a.len() + 1).sum::<usize>(),
        );
        out.push_str(&self.functor);
        out.push('(');
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(arg);
        }
        out.push(')');
        out
    }
}

impl std::fmt::Display for ActionTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// One record from an action enumeration query.
///
/// The enumeration protocol marks end-of-results with an unbound
/// variable rather than an empty response, so a record is either a
/// concrete term or that sentinel. `Unbound` is a normal protocol value,
/// not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionQuery {
    /// A concrete, fully bound action term.
    Term(ActionTerm),
    /// Unbound result variable: no more concrete actions.
    Unbound,
}

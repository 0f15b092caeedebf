//! The state/action universe: enumeration and dense indexing.
//!
//! At construction the environment asks the rule engine for the full set
//! of reachable configurations and the full set of parameterized moves,
//! and assigns each a dense zero-based index in enumeration order. This
//! is the only place engine symbols are translated into integers; every
//! later lookup, forward or reverse, goes through the tables built here.
//!
//! The mapping is a bijection and is never mutated after construction.
//! Rebuilding it mid-episode would silently invalidate any value table
//! keyed on the indices.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::core::{ActionId, StateId};
use crate::engine::{ActionQuery, RuleEngine};
use crate::env::EnvError;

/// An insertion-ordered bijection between symbols and dense indices.
///
/// The forward direction is a hash map; the reverse direction is kept
/// explicitly as a vector indexed by the dense id, so index-to-symbol
/// lookup is O(1) rather than a scan of the map.
///
/// ## Example
///
/// ```
/// use blocks_rl::universe::SymbolTable;
///
/// let mut table = SymbolTable::new();
/// let a = table.insert("ab1");
/// let b = table.insert("ba2");
///
/// assert_eq!((a, b), (0, 1));
/// assert_eq!(table.index_of("ba2"), Some(1));
/// assert_eq!(table.symbol_of(0), Some("ab1"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    forward: FxHashMap<String, u32>,
    reverse: Vec<String>,
}

impl SymbolTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, assigning the next dense index.
    ///
    /// A symbol already present keeps its first-seen index, which is
    /// returned unchanged.
    pub fn insert(&mut self, symbol: &str) -> u32 {
        if let Some(&index) = self.forward.get(symbol) {
            return index;
        }
        let index = self.reverse.len() as u32;
        self.forward.insert(symbol.to_string(), index);
        self.reverse.push(symbol.to_string());
        index
    }

    /// Look up the dense index of a symbol.
    #[must_use]
    pub fn index_of(&self, symbol: &str) -> Option<u32> {
        self.forward.get(symbol).copied()
    }

    /// Look up the symbol at a dense index.
    #[must_use]
    pub fn symbol_of(&self, index: u32) -> Option<&str> {
        self.reverse.get(index as usize).map(String::as_str)
    }

    /// Number of symbols in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Iterate over symbols in index order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.reverse.iter().map(String::as_str)
    }
}

/// The enumerated universe of one loaded world model.
///
/// Built once per environment instance and read-only afterwards. Safe to
/// share across environment instances only when each was built from an
/// engine loaded with the identical definition; mismatched definitions
/// would silently produce inconsistent indices.
#[derive(Clone, Debug)]
pub struct Universe {
    states: SymbolTable,
    actions: SymbolTable,
}

impl Universe {
    /// Enumerate states and actions from a loaded engine and index them.
    ///
    /// One state query and one action query. Action records are rendered
    /// into their canonical textual form as they are indexed; an unbound
    /// record terminates the action enumeration early (end-of-results,
    /// not an error).
    ///
    /// Fails with [`EnvError::UniverseEmpty`] when either enumeration
    /// yields nothing concrete.
    pub fn build<E: RuleEngine>(engine: &mut E) -> Result<Self, EnvError> {
        let mut states = SymbolTable::new();
        for symbol in engine.query_states() {
            states.insert(&symbol);
        }
        if states.is_empty() {
            return Err(EnvError::UniverseEmpty { what: "states" });
        }

        let mut actions = SymbolTable::new();
        for record in engine.query_actions() {
            match record {
                ActionQuery::Term(term) => {
                    actions.insert(&term.render());
                }
                ActionQuery::Unbound => {
                    debug!("action enumeration hit end-of-results sentinel");
                    break;
                }
            }
        }
        if actions.is_empty() {
            return Err(EnvError::UniverseEmpty { what: "actions" });
        }

        info!(
            states = states.len(),
            actions = actions.len(),
            "universe enumerated"
        );

        Ok(Self { states, actions })
    }

    /// The state table.
    #[must_use]
    pub fn states(&self) -> &SymbolTable {
        &self.states
    }

    /// The action table.
    #[must_use]
    pub fn actions(&self) -> &SymbolTable {
        &self.actions
    }

    /// Number of enumerated configurations.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of enumerated actions.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Resolve a state symbol to its index.
    #[must_use]
    pub fn state_index(&self, symbol: &str) -> Option<StateId> {
        self.states.index_of(symbol).map(StateId::new)
    }

    /// Resolve a state index to its symbol.
    #[must_use]
    pub fn state_symbol(&self, id: StateId) -> Option<&str> {
        self.states.symbol_of(id.raw())
    }

    /// Resolve an action index to its canonical string.
    ///
    /// This is the lossless reverse mapping used to re-issue step
    /// queries. Out-of-range indices are a caller error.
    pub fn action_string(&self, id: ActionId) -> Result<&str, EnvError> {
        self.actions
            .symbol_of(id.raw())
            .ok_or(EnvError::UnknownAction {
                index: id.raw(),
                len: self.actions.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ActionTerm;

    struct FakeEngine {
        states: Vec<String>,
        actions: Vec<ActionQuery>,
    }

    impl RuleEngine for FakeEngine {
        fn load(&mut self, _definition: &str) -> bool {
            true
        }

        fn query_states(&mut self) -> Vec<String> {
            self.states.clone()
        }

        fn query_actions(&mut self) -> Vec<ActionQuery> {
            self.actions.clone()
        }

        fn reset(&mut self) -> bool {
            true
        }

        fn current_state(&mut self) -> Option<String> {
            self.states.first().cloned()
        }

        fn apply(&mut self, _action: &str) -> bool {
            false
        }
    }

    fn term(functor: &str, args: &[&str]) -> ActionQuery {
        ActionQuery::Term(ActionTerm::new(functor, args))
    }

    #[test]
    fn test_symbol_table_bijection() {
        let mut table = SymbolTable::new();
        let symbols = ["ab1", "ba2", "cc4"];
        for s in &symbols {
            table.insert(s);
        }

        for (i, s) in symbols.iter().enumerate() {
            assert_eq!(table.index_of(s), Some(i as u32));
            assert_eq!(table.symbol_of(i as u32), Some(*s));
        }
        assert_eq!(table.len(), symbols.len());
        assert_eq!(table.symbol_of(3), None);
    }

    #[test]
    fn test_symbol_table_duplicate_keeps_first_index() {
        let mut table = SymbolTable::new();
        assert_eq!(table.insert("x"), 0);
        assert_eq!(table.insert("y"), 1);
        assert_eq!(table.insert("x"), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_build_assigns_enumeration_order() {
        let mut engine = FakeEngine {
            states: vec!["s0".into(), "s1".into(), "s2".into()],
            actions: vec![term("move", &["a", "1", "2"]), term("move", &["b", "2", "3"])],
        };

        let universe = Universe::build(&mut engine).unwrap();

        assert_eq!(universe.state_count(), 3);
        assert_eq!(universe.action_count(), 2);
        assert_eq!(universe.state_index("s1"), Some(StateId::new(1)));
        assert_eq!(universe.state_symbol(StateId::new(2)), Some("s2"));
        assert_eq!(
            universe.action_string(ActionId::new(0)).unwrap(),
            "move(a,1,2)"
        );
    }

    #[test]
    fn test_build_stops_at_unbound_sentinel() {
        let mut engine = FakeEngine {
            states: vec!["s0".into()],
            actions: vec![
                term("move", &["a", "1", "2"]),
                ActionQuery::Unbound,
                term("move", &["b", "2", "3"]),
            ],
        };

        let universe = Universe::build(&mut engine).unwrap();
        assert_eq!(universe.action_count(), 1);
    }

    #[test]
    fn test_build_fails_on_empty_states() {
        let mut engine = FakeEngine {
            states: vec![],
            actions: vec![term("move", &["a", "1", "2"])],
        };

        let err = Universe::build(&mut engine).unwrap_err();
        assert!(matches!(err, EnvError::UniverseEmpty { what: "states" }));
    }

    #[test]
    fn test_build_fails_on_no_concrete_actions() {
        let mut engine = FakeEngine {
            states: vec!["s0".into()],
            actions: vec![ActionQuery::Unbound],
        };

        let err = Universe::build(&mut engine).unwrap_err();
        assert!(matches!(err, EnvError::UniverseEmpty { what: "actions" }));
    }

    #[test]
    fn test_unknown_action_index() {
        let mut engine = FakeEngine {
            states: vec!["s0".into()],
            actions: vec![term("move", &["a", "1", "2"])],
        };

        let universe = Universe::build(&mut engine).unwrap();
        let err = universe.action_string(ActionId::new(5)).unwrap_err();
        assert!(matches!(err, EnvError::UnknownAction { index: 5, len: 1 }));
    }
}

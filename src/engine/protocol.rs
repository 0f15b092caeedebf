//! The rule-engine query/response protocol.
//!
//! The environment never encodes world rules itself. Everything it knows
//! about legality comes from an external rule engine queried over this
//! trait: which configurations exist, which moves exist, whether a given
//! move applies in the current configuration.
//!
//! All calls are synchronous and blocking. Domain failure is a value
//! (`false`, `None`, an empty enumeration), never a panic: the protocol
//! mirrors a query interpreter where a query either succeeds with
//! bindings or fails. An implementation backed by a real external
//! process should fail its queries closed on transport trouble and log
//! the detail itself; the environment maps these outcomes onto its own
//! error taxonomy at the call sites where they are fatal.

use super::term::ActionQuery;

/// Query/response connection to a rule-based world model.
///
/// One environment instance owns one engine connection exclusively for
/// its lifetime. The engine is stateful: `reset` and successful `apply`
/// calls mutate its current configuration.
///
/// ## Implementation notes
///
/// - `query_states` / `query_actions` are issued once, at universe
///   construction. Enumeration order must be stable for a given loaded
///   definition, since dense indices are assigned in that order.
/// - `apply` must mutate the configuration only when it returns `true`.
/// - `shutdown` releases whatever the connection owns (a process, a
///   socket). It is called at most once per connection.
pub trait RuleEngine {
    /// Load a named world-model definition.
    ///
    /// Returns `false` when the definition is unknown or fails to load.
    fn load(&mut self, definition: &str) -> bool;

    /// Enumerate every configuration matching the state predicate.
    fn query_states(&mut self) -> Vec<String>;

    /// Enumerate parameterized actions matching the action predicate.
    ///
    /// An [`ActionQuery::Unbound`] record marks end-of-results; anything
    /// after it is ignored by the universe builder.
    fn query_actions(&mut self) -> Vec<ActionQuery>;

    /// Reset the world to its initial configuration.
    ///
    /// Returns `false` when the engine could not reset.
    fn reset(&mut self) -> bool;

    /// The current configuration, if the engine can report one.
    fn current_state(&mut self) -> Option<String>;

    /// Attempt a parameterized move, rendered in canonical textual form.
    ///
    /// Returns `true` when the move was physically legal and applied,
    /// `false` when it was rejected (configuration unchanged).
    fn apply(&mut self, action: &str) -> bool;

    /// Release the connection and any resource behind it.
    fn shutdown(&mut self) {}
}

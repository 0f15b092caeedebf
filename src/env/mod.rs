//! Environment core: the observe/act/reward protocol.
//!
//! Two variants share one protocol:
//!
//! - [`FixedGoalEnv`]: the observation is the current configuration's
//!   index; the goal is an environment attribute, reported out-of-band
//!   through `info`.
//! - [`GoalConditionedEnv`]: the observation indexes a combined
//!   current++goal symbol, so the same physical configuration maps to a
//!   different observation per active goal and one policy can condition
//!   on the goal.
//!
//! Per step: the agent's action index is resolved back to its canonical
//! action string, issued to the rule engine, and the engine's verdict
//! drives reward and termination. A rejected move is a normal penalized
//! outcome, not an error.

pub mod errors;
pub mod fixed;
pub mod goal;

pub use errors::EnvError;
pub use fixed::{FixedGoalEnv, TargetMode};
pub use goal::{GoalConditionedEnv, GoalSplit};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{ActionId, StateId};
use crate::engine::RuleEngine;
use crate::universe::Universe;

/// Reward for a legal move that does not reach the goal.
pub const STEP_REWARD: f32 = -1.0;

/// Reward for a move the engine rejects as physically illegal.
///
/// Larger in magnitude than [`STEP_REWARD`] to discourage repeated
/// invalid attempts. The configuration does not change.
pub const REJECTED_REWARD: f32 = -10.0;

/// Reward for reaching the goal, overriding the step cost or penalty.
pub const GOAL_REWARD: f32 = 100.0;

/// Result of one environment step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transition {
    /// Observation after the step.
    pub observation: StateId,
    /// Reward for the step.
    pub reward: f32,
    /// Whether the goal was reached.
    pub terminated: bool,
    /// Always `false`: the core imposes no step-count cap. Truncation
    /// belongs to a training harness.
    pub truncated: bool,
    /// Auxiliary diagnostics (target symbol, acceptance verdict).
    pub info: Value,
}

/// The agent-facing protocol both environment variants expose.
///
/// All calls block on round-trips to the rule engine; one environment
/// instance owns one engine connection exclusively for its lifetime.
pub trait Environment {
    /// Cardinality of the observation space.
    fn observation_space_size(&self) -> usize;

    /// Cardinality of the action space.
    fn action_space_size(&self) -> usize;

    /// Start a new episode.
    ///
    /// Resamples the goal, resets the engine, and reads back the
    /// engine's resulting configuration. `seed` reseeds the goal
    /// sampler.
    fn reset(&mut self, seed: Option<u64>) -> Result<(StateId, Value), EnvError>;

    /// Attempt one action.
    fn step(&mut self, action: ActionId) -> Result<Transition, EnvError>;

    /// Release the engine connection and any rendering resource.
    ///
    /// Idempotent: closing an already-closed environment does nothing.
    fn close(&mut self);
}

/// Issue an action to the engine and read back the outcome.
///
/// Shared by both variants. Returns `Some(symbol)` with the engine's new
/// configuration when the move was accepted, `None` when it was rejected
/// (configuration unchanged). An accepted move after which the engine
/// cannot report a configuration is fatal.
pub(crate) fn attempt<E: RuleEngine>(
    engine: &mut E,
    universe: &Universe,
    action: ActionId,
) -> Result<Option<String>, EnvError> {
    let action_string = universe.action_string(action)?;

    if engine.apply(action_string) {
        let symbol = read_current(engine)?;
        debug!(action = action_string, new = symbol.as_str(), "move accepted");
        Ok(Some(symbol))
    } else {
        debug!(action = action_string, "move rejected");
        Ok(None)
    }
}

/// Read the engine's current configuration, failing when it has none.
pub(crate) fn read_current<E: RuleEngine>(engine: &mut E) -> Result<String, EnvError> {
    engine.current_state().ok_or(EnvError::StateUnavailable)
}

/// Compute reward and termination for a resolved step.
///
/// `-1` accepted, `-10` rejected; landing on the target overrides either
/// with `+100`. Termination holds exactly when the observation equals
/// the target observation.
pub(crate) fn score(accepted: bool, observation: StateId, target: StateId) -> (f32, bool) {
    let terminated = observation == target;
    (reward_for(accepted, terminated), terminated)
}

/// Select the reward once acceptance and termination are known.
pub(crate) fn reward_for(accepted: bool, terminated: bool) -> f32 {
    if terminated {
        GOAL_REWARD
    } else if accepted {
        STEP_REWARD
    } else {
        REJECTED_REWARD
    }
}

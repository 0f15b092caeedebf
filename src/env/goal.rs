//! Goal-conditioned environment: observation encodes current + goal.
//!
//! Every state symbol the rule engine enumerates for this variant is a
//! fixed-width concatenation of a "current" sub-symbol and a "goal"
//! sub-symbol. The observation indexes the combined symbol, so the same
//! physical configuration maps to a different observation per active
//! goal and a single policy can be trained to reach arbitrary goals.
//!
//! Authority is split: the goal sub-symbol belongs to the session (drawn
//! at reset, untouched by steps), the current sub-symbol belongs to the
//! engine (re-read after every reset and accepted step). Only their
//! concatenation is ever looked up in the universe.

use std::fmt;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::core::{ActionId, EnvRng, StateId};
use crate::engine::RuleEngine;
use crate::env::{attempt, read_current, reward_for, EnvError, Environment, Transition};
use crate::render::Renderer;
use crate::universe::Universe;

/// Fixed sub-symbol widths for the combined current++goal encoding.
///
/// The reference world uses 3 + 3; a differently-sized universe only
/// needs different widths here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalSplit {
    /// Width of the current sub-symbol.
    pub current_width: usize,
    /// Width of the goal sub-symbol.
    pub goal_width: usize,
}

impl Default for GoalSplit {
    fn default() -> Self {
        Self {
            current_width: 3,
            goal_width: 3,
        }
    }
}

impl GoalSplit {
    /// Create a split with the given widths.
    #[must_use]
    pub const fn new(current_width: usize, goal_width: usize) -> Self {
        Self {
            current_width,
            goal_width,
        }
    }

    /// Total combined-symbol width.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.current_width + self.goal_width
    }

    /// Split a combined symbol into (current, goal) sub-symbols.
    ///
    /// Any other length is a data-integrity error: the universe and the
    /// engine disagree about the encoding.
    pub fn split<'a>(&self, symbol: &'a str) -> Result<(&'a str, &'a str), EnvError> {
        if symbol.len() != self.total() || !symbol.is_char_boundary(self.current_width) {
            return Err(EnvError::MalformedSymbol {
                symbol: symbol.to_string(),
                expected_len: self.total(),
            });
        }
        Ok(symbol.split_at(self.current_width))
    }
}

/// Environment whose observation indexes a combined current++goal symbol.
///
/// ## Example
///
/// ```
/// use blocks_rl::env::{Environment, GoalConditionedEnv};
/// use blocks_rl::worlds::BlocksWorld;
///
/// let mut env =
///     GoalConditionedEnv::new(BlocksWorld::new(), "blocks_world_target", 42).unwrap();
/// let (obs, info) = env.reset(Some(7)).unwrap();
///
/// assert!((obs.raw() as usize) < env.observation_space_size());
/// assert_eq!(info["goal"].as_str().unwrap().len(), 3);
/// env.close();
/// ```
pub struct GoalConditionedEnv<E: RuleEngine> {
    engine: Option<E>,
    universe: Universe,
    split: GoalSplit,
    renderer: Option<Box<dyn Renderer>>,
    rng: EnvRng,
    /// Index of the combined current++goal symbol.
    state: StateId,
    /// Engine-authoritative current sub-symbol, refreshed after every
    /// reset and accepted step.
    current: String,
    /// Session-authoritative goal sub-symbol, drawn at reset.
    goal: String,
    /// Distinct goal sub-symbols across the whole universe, in
    /// enumeration order.
    goal_pool: Vec<String>,
}

impl<E: RuleEngine> fmt::Debug for GoalConditionedEnv<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalConditionedEnv")
            .field("split", &self.split)
            .field("state", &self.state)
            .field("current", &self.current)
            .field("goal", &self.goal)
            .field("goal_pool", &self.goal_pool)
            .finish_non_exhaustive()
    }
}

impl<E: RuleEngine> GoalConditionedEnv<E> {
    /// Load a paired world-model definition with the default 3+3 split.
    pub fn new(engine: E, definition: &str, seed: u64) -> Result<Self, EnvError> {
        Self::with_split(engine, definition, seed, GoalSplit::default())
    }

    /// Load a paired world-model definition with explicit widths.
    ///
    /// Every enumerated combined symbol is width-checked here; one
    /// malformed symbol fails construction.
    pub fn with_split(
        mut engine: E,
        definition: &str,
        seed: u64,
        split: GoalSplit,
    ) -> Result<Self, EnvError> {
        if !engine.load(definition) {
            return Err(EnvError::EngineLoad {
                definition: definition.to_string(),
            });
        }

        let universe = Universe::build(&mut engine)?;

        let mut goal_pool: Vec<String> = Vec::new();
        for symbol in universe.states().symbols() {
            let (_, goal) = split.split(symbol)?;
            if !goal_pool.iter().any(|g| g == goal) {
                goal_pool.push(goal.to_string());
            }
        }

        let first = universe
            .state_symbol(StateId::new(0))
            .ok_or(EnvError::UniverseEmpty { what: "states" })?;
        let (current, _) = split.split(first)?;
        let current = current.to_string();

        let mut rng = EnvRng::new(seed);
        let goal = sample_goal(&mut rng, &goal_pool, &current)?;

        info!(
            definition,
            states = universe.state_count(),
            actions = universe.action_count(),
            goals = goal_pool.len(),
            "goal-conditioned environment constructed"
        );

        Ok(Self {
            engine: Some(engine),
            universe,
            split,
            renderer: None,
            rng,
            state: StateId::new(0),
            current,
            goal,
            goal_pool,
        })
    }

    /// Attach a rendering collaborator.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// The enumerated universe of combined symbols.
    #[must_use]
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The session's active goal sub-symbol.
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// The engine-authoritative current sub-symbol.
    #[must_use]
    pub fn current_symbol(&self) -> &str {
        &self.current
    }

    /// Re-read the current sub-symbol from the engine and recombine it
    /// with the session goal into an observation index.
    fn observe(&mut self, current: String) -> Result<StateId, EnvError> {
        if current.len() != self.split.current_width {
            return Err(EnvError::MalformedSymbol {
                symbol: current,
                expected_len: self.split.current_width,
            });
        }

        let combined = format!("{}{}", current, self.goal);
        let state = self
            .universe
            .state_index(&combined)
            .ok_or(EnvError::UnmappedSymbol { symbol: combined })?;

        self.current = current;
        self.state = state;
        Ok(state)
    }

    fn info(&self, accepted: Option<bool>) -> Value {
        let mut info = json!({
            "goal": self.goal,
            "current": self.current,
        });
        if let Some(accepted) = accepted {
            info["accepted"] = json!(accepted);
        }
        info
    }
}

impl<E: RuleEngine> Environment for GoalConditionedEnv<E> {
    fn observation_space_size(&self) -> usize {
        self.universe.state_count()
    }

    fn action_space_size(&self) -> usize {
        self.universe.action_count()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<(StateId, Value), EnvError> {
        if let Some(seed) = seed {
            self.rng.reseed(seed);
        }

        let engine = self.engine.as_mut().ok_or(EnvError::Closed)?;
        if !engine.reset() {
            warn!("engine reset query failed");
        }
        let current = read_current(engine)?;

        self.goal = sample_goal(&mut self.rng, &self.goal_pool, &current)?;
        let state = self.observe(current)?;

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.update(&self.current, Some(&self.goal));
        }

        debug!(current = self.current.as_str(), goal = self.goal.as_str(), "episode reset");
        Ok((state, self.info(None)))
    }

    fn step(&mut self, action: ActionId) -> Result<Transition, EnvError> {
        let engine = self.engine.as_mut().ok_or(EnvError::Closed)?;
        let outcome = attempt(engine, &self.universe, action)?;
        let accepted = outcome.is_some();

        if let Some(current) = outcome {
            self.observe(current)?;
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.update(&self.current, None);
            }
        }

        let terminated = self.current == self.goal;
        let reward = reward_for(accepted, terminated);

        Ok(Transition {
            observation: self.state,
            reward,
            terminated,
            truncated: false,
            info: self.info(Some(accepted)),
        })
    }

    fn close(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.shutdown();
        }
        self.renderer = None;
    }
}

/// Uniform draw over the goal pool, excluding the current sub-symbol.
fn sample_goal(rng: &mut EnvRng, pool: &[String], current: &str) -> Result<String, EnvError> {
    let candidates: Vec<&String> = pool.iter().filter(|g| g.as_str() != current).collect();

    rng.choose(&candidates)
        .map(|g| (*g).clone())
        .ok_or(EnvError::UniverseEmpty { what: "goals" })
}

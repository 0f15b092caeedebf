//! Fixed-goal environment: observation is the configuration index.
//!
//! The goal is an environment attribute, resampled per episode (or
//! pinned, see [`TargetMode`]) and reported out-of-band through `info`.
//! The observation space is exactly the set of distinct world
//! configurations.

use std::fmt;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::core::{ActionId, EnvRng, StateId};
use crate::engine::RuleEngine;
use crate::env::{attempt, read_current, score, EnvError, Environment, Transition};
use crate::render::Renderer;
use crate::universe::Universe;

/// How the per-episode target is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetMode {
    /// Draw a fresh target uniformly on every reset, excluding the
    /// start configuration.
    Resample,
    /// Keep one target for the whole run. Useful when training a single
    /// policy against a single goal, so the learned value table keeps
    /// one meaning across episodes.
    Pinned(StateId),
}

/// Environment whose observation is the current configuration only.
///
/// ## Example
///
/// ```
/// use blocks_rl::env::{Environment, FixedGoalEnv};
/// use blocks_rl::worlds::BlocksWorld;
///
/// let mut env = FixedGoalEnv::new(BlocksWorld::new(), "blocks_world", 42).unwrap();
/// let (obs, info) = env.reset(Some(7)).unwrap();
///
/// assert!((obs.raw() as usize) < env.observation_space_size());
/// assert!(info.get("target").is_some());
/// env.close();
/// ```
pub struct FixedGoalEnv<E: RuleEngine> {
    engine: Option<E>,
    universe: Universe,
    renderer: Option<Box<dyn Renderer>>,
    rng: EnvRng,
    state: StateId,
    target: StateId,
    target_mode: TargetMode,
}

impl<E: RuleEngine> fmt::Debug for FixedGoalEnv<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedGoalEnv")
            .field("state", &self.state)
            .field("target", &self.target)
            .field("target_mode", &self.target_mode)
            .finish_non_exhaustive()
    }
}

impl<E: RuleEngine> FixedGoalEnv<E> {
    /// Load a world-model definition and enumerate its universe.
    ///
    /// The initial configuration is whichever the engine enumerates
    /// first (index 0); the initial target is sampled uniformly from
    /// every other configuration.
    pub fn new(mut engine: E, definition: &str, seed: u64) -> Result<Self, EnvError> {
        if !engine.load(definition) {
            return Err(EnvError::EngineLoad {
                definition: definition.to_string(),
            });
        }

        let universe = Universe::build(&mut engine)?;
        let mut rng = EnvRng::new(seed);
        let state = StateId::new(0);
        let target = sample_target(&mut rng, &universe, state)?;

        info!(
            definition,
            states = universe.state_count(),
            actions = universe.action_count(),
            "fixed-goal environment constructed"
        );

        Ok(Self {
            engine: Some(engine),
            universe,
            renderer: None,
            rng,
            state,
            target,
            target_mode: TargetMode::Resample,
        })
    }

    /// Attach a rendering collaborator.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Pin the target to a named configuration for the whole run.
    ///
    /// Fails with [`EnvError::UnmappedSymbol`] when the symbol is not in
    /// the universe. A pinned target equal to the start configuration
    /// surfaces at the next reset as an empty target pool.
    pub fn pin_target(&mut self, symbol: &str) -> Result<StateId, EnvError> {
        let id = self
            .universe
            .state_index(symbol)
            .ok_or_else(|| EnvError::UnmappedSymbol {
                symbol: symbol.to_string(),
            })?;
        self.target_mode = TargetMode::Pinned(id);
        Ok(id)
    }

    /// Return to per-reset target resampling.
    pub fn resample_targets(&mut self) {
        self.target_mode = TargetMode::Resample;
    }

    /// The enumerated universe.
    #[must_use]
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The active target's index.
    #[must_use]
    pub fn target(&self) -> StateId {
        self.target
    }

    /// The active target's symbol.
    #[must_use]
    pub fn target_symbol(&self) -> &str {
        self.universe
            .state_symbol(self.target)
            .unwrap_or_default()
    }

    fn lookup(&self, symbol: &str) -> Result<StateId, EnvError> {
        self.universe
            .state_index(symbol)
            .ok_or_else(|| EnvError::UnmappedSymbol {
                symbol: symbol.to_string(),
            })
    }

    fn info(&self) -> Value {
        json!({
            "target": self.target_symbol(),
            "target_id": self.target.raw(),
        })
    }
}

impl<E: RuleEngine> Environment for FixedGoalEnv<E> {
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
        let symbol = read_current(engine)?;
        self.state = self.lookup(&symbol)?;

        self.target = match self.target_mode {
            TargetMode::Pinned(id) if id != self.state => id,
            TargetMode::Pinned(_) => {
                // Pinned to the start configuration: the episode would be
                // solved before the first step.
                return Err(EnvError::UniverseEmpty { what: "targets" });
            }
            TargetMode::Resample => sample_target(&mut self.rng, &self.universe, self.state)?,
        };

        if let Some(renderer) = self.renderer.as_mut() {
            let target = self.universe.state_symbol(self.target).map(str::to_string);
            renderer.update(&symbol, target.as_deref());
        }

        debug!(current = symbol.as_str(), target = self.target_symbol(), "episode reset");
        Ok((self.state, self.info()))
    }

    fn step(&mut self, action: ActionId) -> Result<Transition, EnvError> {
        let engine = self.engine.as_mut().ok_or(EnvError::Closed)?;
        let outcome = attempt(engine, &self.universe, action)?;
        let accepted = outcome.is_some();

        if let Some(symbol) = outcome {
            self.state = self.lookup(&symbol)?;
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.update(&symbol, None);
            }
        }

        let (reward, terminated) = score(accepted, self.state, self.target);
        let mut info = self.info();
        info["accepted"] = json!(accepted);

        Ok(Transition {
            observation: self.state,
            reward,
            terminated,
            truncated: false,
            info,
        })
    }

    fn close(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.shutdown();
        }
        self.renderer = None;
    }
}

/// Uniform draw over all configurations except the current one.
fn sample_target(
    rng: &mut EnvRng,
    universe: &Universe,
    current: StateId,
) -> Result<StateId, EnvError> {
    let candidates: Vec<u32> = (0..universe.state_count() as u32)
        .filter(|&i| i != current.raw())
        .collect();

    rng.choose(&candidates)
        .copied()
        .map(StateId::new)
        .ok_or(EnvError::UniverseEmpty { what: "targets" })
}

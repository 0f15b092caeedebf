//! # blocks-rl
//!
//! A discrete reinforcement-learning environment over a rule-based world
//! model: a deterministic block-stacking simulator exposed through the
//! uniform observe/act/reward interface learning agents consume.
//!
//! ## Design Principles
//!
//! 1. **The rules live elsewhere**: legality of configurations and moves
//!    is owned by a rule engine behind the [`engine::RuleEngine`] trait.
//!    The core only enumerates, indexes, and drives it.
//!
//! 2. **Dense integers at the boundary**: agents see dense state/action
//!    indices built once per instance by the universe builder and frozen
//!    afterwards, so learned value tables stay valid for the whole run.
//!
//! 3. **One engine, one owner**: each environment instance exclusively
//!    owns its engine connection; `close` releases it and is idempotent.
//!
//! ## Architecture
//!
//! - `core`: dense index newtypes and seedable RNG
//! - `engine`: rule-engine protocol and action terms
//! - `universe`: symbol↔index bijections built from one enumeration pass
//! - `env`: the two environment variants over a shared step protocol
//! - `render`: the display collaborator seam
//! - `worlds`: bundled native blocks-world rule engine
//!
//! ## Example
//!
//! ```
//! use blocks_rl::env::{Environment, FixedGoalEnv};
//! use blocks_rl::worlds::BlocksWorld;
//!
//! let mut env = FixedGoalEnv::new(BlocksWorld::new(), "blocks_world", 42)?;
//! let (mut obs, _info) = env.reset(Some(0))?;
//!
//! for action in 0..env.action_space_size() as u32 {
//!     let t = env.step(blocks_rl::core::ActionId::new(action))?;
//!     obs = t.observation;
//!     if t.terminated {
//!         break;
//!     }
//! }
//! env.close();
//! # let _ = obs;
//! # Ok::<(), blocks_rl::env::EnvError>(())
//! ```

pub mod core;
pub mod engine;
pub mod env;
pub mod render;
pub mod universe;
pub mod worlds;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{ActionId, EnvRng, StateId};
pub use crate::engine::{ActionQuery, ActionTerm, RuleEngine};
pub use crate::env::{
    EnvError, Environment, FixedGoalEnv, GoalConditionedEnv, GoalSplit, TargetMode, Transition,
    GOAL_REWARD, REJECTED_REWARD, STEP_REWARD,
};
pub use crate::render::Renderer;
pub use crate::universe::{SymbolTable, Universe};
pub use crate::worlds::BlocksWorld;

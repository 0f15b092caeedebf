//! Core value types: dense indices and RNG.
//!
//! These are the building blocks every other module shares. Nothing in
//! here knows about the rule engine or the environment protocol.

pub mod index;
pub mod rng;

pub use index::{ActionId, StateId};
pub use rng::EnvRng;

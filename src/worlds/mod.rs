//! Bundled rule-engine implementations.
//!
//! The environment core works against any [`crate::engine::RuleEngine`];
//! this module ships the reference blocks world so the crate is usable
//! (and testable) without an external engine process.

pub mod blocks;

pub use blocks::BlocksWorld;

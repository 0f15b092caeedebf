//! Environment error taxonomy.
//!
//! Everything here is fatal and propagates synchronously to the caller
//! of `new`/`reset`/`step`; there are no retries in the core. A move the
//! engine rejects as physically illegal is NOT an error — it is a
//! normal, penalized step outcome.

use thiserror::Error;

/// Errors surfaced by environment construction, reset, and step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// The world-model definition failed to load.
    #[error("rule engine could not load world-model definition `{definition}`")]
    EngineLoad { definition: String },

    /// An enumeration query returned nothing concrete.
    #[error("universe enumeration returned no {what}")]
    UniverseEmpty { what: &'static str },

    /// The engine could not report a current configuration when one was
    /// required. Indicates a desynchronized engine; never retried.
    #[error("rule engine could not report a current configuration")]
    StateUnavailable,

    /// A state symbol violates the fixed-width split contract.
    #[error("state symbol `{symbol}` is not {expected_len} characters")]
    MalformedSymbol { symbol: String, expected_len: usize },

    /// The caller passed an action index outside the universe.
    #[error("action index {index} is outside the {len}-action universe")]
    UnknownAction { index: u32, len: usize },

    /// The engine reported a well-formed configuration that the
    /// enumerated universe does not contain. Indicates the engine and
    /// the universe were built from different definitions.
    #[error("configuration `{symbol}` is not in the enumerated universe")]
    UnmappedSymbol { symbol: String },

    /// `reset` or `step` was called after `close` released the engine.
    #[error("environment is closed")]
    Closed,
}

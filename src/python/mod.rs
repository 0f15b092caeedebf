//! Python bindings for the blocks-world environments.
//!
//! # Quick Start
//!
//! ```python
//! import blocks_rl
//!
//! env = blocks_rl.BlocksWorldEnv(seed=42)
//! obs, info = env.reset()
//!
//! obs, reward, terminated, truncated, info = env.step(0)
//! env.close()
//! ```

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

/// blocks_rl: rule-engine-backed blocks-world environments.
///
/// This module provides:
/// - `BlocksWorldEnv`: fixed-goal variant (observation = configuration)
/// - `BlocksWorldTargetEnv`: goal-conditioned variant (observation =
///   configuration paired with the active goal)
#[pymodule]
fn blocks_rl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBlocksWorldEnv>()?;
    m.add_class::<PyBlocksWorldTargetEnv>()?;
    Ok(())
}

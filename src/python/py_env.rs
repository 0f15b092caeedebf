//! Environment bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use serde_json::Value;

use crate::core::ActionId;
use crate::env::{EnvError, Environment, FixedGoalEnv, GoalConditionedEnv};
use crate::worlds::BlocksWorld;

fn to_py_err(err: EnvError) -> PyErr {
    match err {
        EnvError::UnknownAction { .. } => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn json_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    Ok(match value {
        Value::Null => py.None(),
        Value::Bool(b) => b.into_py(py),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into_py(py)
            } else {
                n.as_f64().unwrap_or(f64::NAN).into_py(py)
            }
        }
        Value::String(s) => s.as_str().into_py(py),
        Value::Array(items) => {
            let list = PyList::empty_bound(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            list.into_py(py)
        }
        Value::Object(map) => {
            let dict = PyDict::new_bound(py);
            for (key, item) in map {
                dict.set_item(key, json_to_py(py, item)?)?;
            }
            dict.into_py(py)
        }
    })
}

/// Fixed-goal blocks-world environment.
///
/// Observation is the index of the current configuration; the goal is
/// reported through `info`.
#[pyclass(name = "BlocksWorldEnv")]
pub struct PyBlocksWorldEnv {
    inner: FixedGoalEnv<BlocksWorld>,
}

#[pymethods]
impl PyBlocksWorldEnv {
    /// Create the environment over the bundled blocks world.
    #[new]
    #[pyo3(signature = (seed=0))]
    fn new(seed: u64) -> PyResult<Self> {
        let inner =
            FixedGoalEnv::new(BlocksWorld::new(), "blocks_world", seed).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Number of distinct observations.
    #[getter]
    fn observation_space_size(&self) -> usize {
        self.inner.observation_space_size()
    }

    /// Number of distinct actions.
    #[getter]
    fn action_space_size(&self) -> usize {
        self.inner.action_space_size()
    }

    /// Start a new episode. Returns `(observation, info)`.
    #[pyo3(signature = (seed=None))]
    fn reset(&mut self, py: Python<'_>, seed: Option<u64>) -> PyResult<(u32, PyObject)> {
        let (obs, info) = self.inner.reset(seed).map_err(to_py_err)?;
        Ok((obs.raw(), json_to_py(py, &info)?))
    }

    /// Attempt one action.
    ///
    /// Returns `(observation, reward, terminated, truncated, info)`.
    fn step(
        &mut self,
        py: Python<'_>,
        action: u32,
    ) -> PyResult<(u32, f32, bool, bool, PyObject)> {
        let t = self.inner.step(ActionId::new(action)).map_err(to_py_err)?;
        Ok((
            t.observation.raw(),
            t.reward,
            t.terminated,
            t.truncated,
            json_to_py(py, &t.info)?,
        ))
    }

    /// Release the engine. Idempotent.
    fn close(&mut self) {
        self.inner.close();
    }
}

/// Goal-conditioned blocks-world environment.
///
/// Observation indexes a combined current++goal symbol.
#[pyclass(name = "BlocksWorldTargetEnv")]
pub struct PyBlocksWorldTargetEnv {
    inner: GoalConditionedEnv<BlocksWorld>,
}

#[pymethods]
impl PyBlocksWorldTargetEnv {
    /// Create the environment over the bundled paired blocks world.
    #[new]
    #[pyo3(signature = (seed=0))]
    fn new(seed: u64) -> PyResult<Self> {
        let inner = GoalConditionedEnv::new(BlocksWorld::new(), "blocks_world_target", seed)
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Number of distinct (current, goal) observations.
    #[getter]
    fn observation_space_size(&self) -> usize {
        self.inner.observation_space_size()
    }

    /// Number of distinct actions.
    #[getter]
    fn action_space_size(&self) -> usize {
        self.inner.action_space_size()
    }

    /// Start a new episode. Returns `(observation, info)`.
    #[pyo3(signature = (seed=None))]
    fn reset(&mut self, py: Python<'_>, seed: Option<u64>) -> PyResult<(u32, PyObject)> {
        let (obs, info) = self.inner.reset(seed).map_err(to_py_err)?;
        Ok((obs.raw(), json_to_py(py, &info)?))
    }

    /// Attempt one action.
    ///
    /// Returns `(observation, reward, terminated, truncated, info)`.
    fn step(
        &mut self,
        py: Python<'_>,
        action: u32,
    ) -> PyResult<(u32, f32, bool, bool, PyObject)> {
        let t = self.inner.step(ActionId::new(action)).map_err(to_py_err)?;
        Ok((
            t.observation.raw(),
            t.reward,
            t.terminated,
            t.truncated,
            json_to_py(py, &t.info)?,
        ))
    }

    /// Release the engine. Idempotent.
    fn close(&mut self) {
        self.inner.close();
    }
}

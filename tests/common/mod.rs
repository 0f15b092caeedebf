//! Scripted rule-engine double for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use blocks_rl::engine::{ActionQuery, ActionTerm, RuleEngine};

/// A rule engine whose universe and transition function are scripted.
///
/// `transitions` maps `(current symbol, action string)` to the next
/// symbol; anything unmapped is rejected. `shutdowns` counts release
/// calls so tests can observe close behavior from outside.
pub struct ScriptedEngine {
    pub states: Vec<String>,
    pub actions: Vec<ActionQuery>,
    pub initial: String,
    pub current: Option<String>,
    pub transitions: HashMap<(String, String), String>,
    pub load_ok: bool,
    /// When set, `current_state` reports nothing (desync simulation).
    pub mute_current: bool,
    pub shutdowns: Arc<AtomicUsize>,
}

impl ScriptedEngine {
    pub fn new(states: &[&str], actions: &[(&str, &[&str])]) -> Self {
        let initial = states.first().map(|s| (*s).to_string()).unwrap_or_default();
        Self {
            states: states.iter().map(|s| (*s).to_string()).collect(),
            actions: actions
                .iter()
                .map(|(functor, args)| ActionQuery::Term(ActionTerm::new(*functor, args)))
                .collect(),
            current: Some(initial.clone()),
            initial,
            transitions: HashMap::new(),
            load_ok: true,
            mute_current: false,
            shutdowns: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Script an accepted transition.
    pub fn on(mut self, current: &str, action: &str, next: &str) -> Self {
        self.transitions
            .insert((current.to_string(), action.to_string()), next.to_string());
        self
    }

    pub fn shutdown_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.shutdowns)
    }
}

impl RuleEngine for ScriptedEngine {
    fn load(&mut self, _definition: &str) -> bool {
        self.load_ok
    }

    fn query_states(&mut self) -> Vec<String> {
        self.states.clone()
    }

    fn query_actions(&mut self) -> Vec<ActionQuery> {
        self.actions.clone()
    }

    fn reset(&mut self) -> bool {
        self.current = Some(self.initial.clone());
        true
    }

    fn current_state(&mut self) -> Option<String> {
        if self.mute_current {
            return None;
        }
        self.current.clone()
    }

    fn apply(&mut self, action: &str) -> bool {
        let Some(current) = self.current.clone() else {
            return false;
        };
        match self.transitions.get(&(current, action.to_string())) {
            Some(next) => {
                self.current = Some(next.clone());
                true
            }
            None => false,
        }
    }

    fn shutdown(&mut self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

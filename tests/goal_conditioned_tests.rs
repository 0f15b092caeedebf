//! Goal-conditioned environment integration tests.

mod common;

use std::sync::atomic::Ordering;

use blocks_rl::core::ActionId;
use blocks_rl::env::{
    EnvError, Environment, GoalConditionedEnv, GoalSplit, GOAL_REWARD, REJECTED_REWARD,
    STEP_REWARD,
};
use blocks_rl::worlds::BlocksWorld;
use common::ScriptedEngine;

/// Two 2-char configurations paired every way, one nullary action that
/// flips between them. The engine reports 2-char currents; the combined
/// universe is 4 chars wide.
fn paired_engine() -> ScriptedEngine {
    let mut engine = ScriptedEngine::new(
        &["aabb", "aaaa", "bbaa", "bbbb"],
        &[("flip", &[])],
    )
    .on("aa", "flip", "bb")
    .on("bb", "flip", "aa");
    engine.initial = "aa".to_string();
    engine.current = Some("aa".to_string());
    engine
}

fn paired_env(seed: u64) -> GoalConditionedEnv<ScriptedEngine> {
    GoalConditionedEnv::with_split(paired_engine(), "paired", seed, GoalSplit::new(2, 2)).unwrap()
}

// =============================================================================
// Observation Encoding
// =============================================================================

#[test]
fn test_reset_combines_current_and_goal() {
    let mut env = paired_env(0);
    let (obs, info) = env.reset(Some(0)).unwrap();

    // Current is aa; the only other goal is bb; combined aabb is index 0.
    assert_eq!(env.current_symbol(), "aa");
    assert_eq!(env.goal(), "bb");
    assert_eq!(obs.raw(), 0);
    assert_eq!(info["goal"], "bb");
    assert_eq!(info["current"], "aa");
}

#[test]
fn test_same_configuration_different_goal_different_observation() {
    // The bundled paired world has many goals, so the combined index
    // moves with the goal even though the physical start is fixed.
    let mut env =
        GoalConditionedEnv::new(BlocksWorld::new(), "blocks_world_target", 42).unwrap();

    let mut seen = std::collections::HashSet::new();
    for seed in 0..10 {
        let (obs, _) = env.reset(Some(seed)).unwrap();
        assert_eq!(env.current_symbol(), "bc1");
        seen.insert(obs);
    }
    assert!(seen.len() > 1);
    env.close();
}

// =============================================================================
// Session vs Engine Authority
// =============================================================================

#[test]
fn test_goal_survives_steps_current_follows_engine() {
    let mut env = paired_env(0);
    env.reset(Some(0)).unwrap();
    assert_eq!(env.goal(), "bb");

    let t = env.step(ActionId::new(0)).unwrap();
    // Engine moved aa -> bb; the session goal did not move.
    assert_eq!(env.current_symbol(), "bb");
    assert_eq!(env.goal(), "bb");
    assert_eq!(env.universe().state_symbol(t.observation).unwrap(), "bbbb");
}

#[test]
fn test_reaching_goal_terminates_with_goal_reward() {
    let mut env = paired_env(0);
    env.reset(Some(0)).unwrap();

    let t = env.step(ActionId::new(0)).unwrap();
    assert!(t.terminated);
    assert_eq!(t.reward, GOAL_REWARD);
    assert!(!t.truncated);
}

#[test]
fn test_rejected_step_keeps_observation_and_goal() {
    // No scripted transitions: every move is rejected.
    let mut engine = paired_engine();
    engine.transitions.clear();
    let mut env =
        GoalConditionedEnv::with_split(engine, "paired", 0, GoalSplit::new(2, 2)).unwrap();
    let (start, _) = env.reset(Some(0)).unwrap();

    let t = env.step(ActionId::new(0)).unwrap();
    assert_eq!(t.observation, start);
    assert_eq!(t.reward, REJECTED_REWARD);
    assert!(!t.terminated);
    assert_eq!(t.info["accepted"], false);
}

#[test]
fn test_goal_sampling_excludes_current() {
    let mut env =
        GoalConditionedEnv::new(BlocksWorld::new(), "blocks_world_target", 7).unwrap();

    for seed in 0..30 {
        env.reset(Some(seed)).unwrap();
        assert_ne!(env.goal(), env.current_symbol());
    }
    env.close();
}

// =============================================================================
// Split Contract
// =============================================================================

#[test]
fn test_malformed_universe_symbol_fails_construction() {
    let engine = ScriptedEngine::new(&["aabb", "aab"], &[("flip", &[])]);
    let err =
        GoalConditionedEnv::with_split(engine, "paired", 0, GoalSplit::new(2, 2)).unwrap_err();

    assert!(matches!(
        err,
        EnvError::MalformedSymbol { ref symbol, expected_len: 4 } if symbol == "aab"
    ));
}

#[test]
fn test_wrong_width_current_fails_observation() {
    let mut engine = paired_engine();
    engine.initial = "aaa".to_string();
    let mut env =
        GoalConditionedEnv::with_split(engine, "paired", 0, GoalSplit::new(2, 2)).unwrap();

    let err = env.reset(Some(0)).unwrap_err();
    assert!(matches!(
        err,
        EnvError::MalformedSymbol { ref symbol, expected_len: 2 } if symbol == "aaa"
    ));
}

#[test]
fn test_reference_world_symbols_split_cleanly() {
    let mut env =
        GoalConditionedEnv::new(BlocksWorld::new(), "blocks_world_target", 3).unwrap();
    let split = GoalSplit::default();

    for symbol in env.universe().states().symbols() {
        assert_eq!(symbol.len(), 6);
        let (current, goal) = split.split(symbol).unwrap();
        assert_eq!(current.len(), 3);
        assert_eq!(goal.len(), 3);
        assert_eq!(format!("{current}{goal}"), symbol);
    }
    env.close();
}

// =============================================================================
// Step Cost and Close
// =============================================================================

#[test]
fn test_legal_non_goal_move_costs_one() {
    let mut env =
        GoalConditionedEnv::new(BlocksWorld::new(), "blocks_world_target", 11).unwrap();
    env.reset(Some(4)).unwrap();

    // From bc1, move(a,b,2) is legal and lands on 2c1; the drawn goal
    // cannot be the current configuration, but re-draw until it is not
    // 2c1 either so the move cannot terminate.
    let mut seed = 4;
    while env.goal() == "2c1" {
        seed += 1;
        env.reset(Some(seed)).unwrap();
    }

    let action = env.universe().actions().index_of("move(a,b,2)").unwrap();
    let t = env.step(ActionId::new(action)).unwrap();

    assert_eq!(t.reward, STEP_REWARD);
    assert!(!t.terminated);
    assert_eq!(env.current_symbol(), "2c1");
    env.close();
}

#[test]
fn test_close_is_idempotent() {
    let engine = paired_engine();
    let shutdowns = engine.shutdown_counter();
    let mut env =
        GoalConditionedEnv::with_split(engine, "paired", 0, GoalSplit::new(2, 2)).unwrap();

    env.close();
    env.close();
    assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    assert_eq!(env.reset(None).unwrap_err(), EnvError::Closed);
}

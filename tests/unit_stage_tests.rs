//! # Preset State Machine Unit Tests / 预设状态机单元测试

use preset_matrix::core::models::Stage;
use preset_matrix::core::stage::PresetState;

/// Drives the machine with the given exit codes and returns the final state
/// plus the stages that were visited.
fn drive(results: &[i32]) -> (PresetState, Vec<Stage>) {
    let mut state = PresetState::NotStarted.start();
    let mut visited = Vec::new();
    let mut results = results.iter();
    while let Some(stage) = state.stage() {
        visited.push(stage);
        state = state.advance(*results.next().expect("ran out of stage results"));
    }
    (state, visited)
}

#[test]
fn test_all_stages_pass_in_order() {
    let (state, visited) = drive(&[0, 0, 0]);
    assert_eq!(state, PresetState::DoneOk);
    assert_eq!(visited, vec![Stage::Configure, Stage::Build, Stage::Test]);
}

#[test]
fn test_configure_failure_stops_immediately() {
    let (state, visited) = drive(&[1]);
    assert_eq!(state, PresetState::DoneFailed);
    assert_eq!(visited, vec![Stage::Configure]);
}

#[test]
fn test_build_failure_skips_test() {
    let (state, visited) = drive(&[0, 2]);
    assert_eq!(state, PresetState::DoneFailed);
    assert_eq!(visited, vec![Stage::Configure, Stage::Build]);
}

#[test]
fn test_test_failure_ends_failed() {
    let (state, visited) = drive(&[0, 0, -9]);
    assert_eq!(state, PresetState::DoneFailed);
    assert_eq!(visited.len(), 3);
}

#[test]
fn test_idle_states_have_no_stage() {
    assert_eq!(PresetState::NotStarted.stage(), None);
    assert_eq!(PresetState::DoneOk.stage(), None);
    assert_eq!(PresetState::DoneFailed.stage(), None);
}

#[test]
fn test_terminal_states_are_sticky() {
    assert_eq!(PresetState::DoneOk.advance(1), PresetState::DoneOk);
    assert_eq!(PresetState::DoneFailed.advance(0), PresetState::DoneFailed);
    assert_eq!(PresetState::NotStarted.advance(0), PresetState::NotStarted);
    assert_eq!(PresetState::DoneOk.start(), PresetState::DoneOk);
    assert!(PresetState::DoneFailed.is_done());
    assert!(PresetState::DoneOk.is_done());
    assert!(!PresetState::Testing.is_done());
}

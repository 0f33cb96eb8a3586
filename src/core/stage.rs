//! # Preset State Machine / 预设状态机
//!
//! Each preset moves through `NotStarted -> Configuring -> Building -> Testing`
//! and ends in `DoneOk` or `DoneFailed`. The first failing stage jumps straight
//! to `DoneFailed`, so later stages of that preset are never run.
//!
//! 每个预设依次经历 `NotStarted -> Configuring -> Building -> Testing`，
//! 最终停在 `DoneOk` 或 `DoneFailed`。任一阶段失败会直接进入 `DoneFailed`，
//! 因此该预设的后续阶段不会被执行。

use crate::core::models::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetState {
    NotStarted,
    Configuring,
    Building,
    Testing,
    DoneOk,
    DoneFailed,
}

impl PresetState {
    /// Leaves `NotStarted`. Any other state is returned unchanged.
    pub fn start(self) -> Self {
        match self {
            PresetState::NotStarted => PresetState::Configuring,
            other => other,
        }
    }

    /// The stage whose command must run in this state, if any.
    pub fn stage(self) -> Option<Stage> {
        match self {
            PresetState::Configuring => Some(Stage::Configure),
            PresetState::Building => Some(Stage::Build),
            PresetState::Testing => Some(Stage::Test),
            PresetState::NotStarted | PresetState::DoneOk | PresetState::DoneFailed => None,
        }
    }

    /// Applies the exit code of the current stage's command; 0 moves on, anything
    /// else ends the preset as failed.
    ///
    /// States without a running stage ignore the call.
    pub fn advance(self, exit_code: i32) -> Self {
        match (self, exit_code == 0) {
            (PresetState::Configuring, true) => PresetState::Building,
            (PresetState::Building, true) => PresetState::Testing,
            (PresetState::Testing, true) => PresetState::DoneOk,
            (PresetState::Configuring | PresetState::Building | PresetState::Testing, false) => {
                PresetState::DoneFailed
            }
            (other, _) => other,
        }
    }

    pub fn is_done(self) -> bool {
        matches!(self, PresetState::DoneOk | PresetState::DoneFailed)
    }
}


//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures shared by the orchestrator and the
//! reporters: presets, stages, per-stage statuses, per-preset outcomes and the
//! aggregated run report that decides the process exit code.
//!
//! 此模块定义了编排器和报告器共享的数据结构：预设、阶段、每个阶段的状态、
//! 每个预设的结果，以及决定进程退出码的汇总运行报告。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// File name of the memory-check log artifact.
/// 内存检查日志文件的名称。
pub const MEMCHECK_LOG_FILE: &str = "valgrind.log";

/// A named build configuration understood by the external build tool.
/// 外部构建工具可识别的命名构建配置。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preset(String);

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The log file name for one stage of this preset, e.g. `gcc-debug_build.log`.
    /// 此预设某个阶段的日志文件名，例如 `gcc-debug_build.log`。
    pub fn log_file_name(&self, stage: Stage) -> String {
        format!("{}_{}.log", self.0, stage.log_suffix())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Preset {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The three dependent steps applied to every preset, in execution order.
/// 应用于每个预设的三个相互依赖的步骤，按执行顺序排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Configure,
    Build,
    Test,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Configure, Stage::Build, Stage::Test];

    pub fn log_suffix(self) -> &'static str {
        match self {
            Stage::Configure => "config",
            Stage::Build => "build",
            Stage::Test => "test",
        }
    }

    /// Column header used by the report table.
    pub fn header(self) -> &'static str {
        match self {
            Stage::Configure => "CONFIG",
            Stage::Build => "BUILD",
            Stage::Test => "TEST",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configure => "configure",
            Stage::Build => "build",
            Stage::Test => "test",
        };
        f.write_str(name)
    }
}

/// Status of one (preset, stage) pair.
///
/// `Pending` is the initial state; a stage moves to exactly one of `Passed` or
/// `Failed` once its command has terminated and never changes afterwards.
///
/// 单个（预设，阶段）对的状态。`Pending` 为初始状态；命令结束后阶段只会转为
/// `Passed` 或 `Failed` 之一，此后不再改变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StageStatus {
    #[default]
    Pending,
    Passed,
    Failed,
}

impl StageStatus {
    /// Exit code 0 is success, anything else is failure.
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            StageStatus::Passed
        } else {
            StageStatus::Failed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StageStatus::Pending => "PENDING",
            StageStatus::Passed => "PASSED",
            StageStatus::Failed => "FAILED",
        }
    }

    pub fn is_passed(self) -> bool {
        self == StageStatus::Passed
    }

    pub fn is_failed(self) -> bool {
        self == StageStatus::Failed
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall status of the memory-check stage.
/// 内存检查阶段的总体状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemcheckStatus {
    Passed,
    Failed,
    /// The gating build directory did not exist, so nothing ran.
    /// 门控构建目录不存在，因此没有运行任何命令。
    Skipped,
}

impl MemcheckStatus {
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            MemcheckStatus::Passed
        } else {
            MemcheckStatus::Failed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemcheckStatus::Passed => "PASSED",
            MemcheckStatus::Failed => "FAILED",
            MemcheckStatus::Skipped => "SKIPPED",
        }
    }

    pub fn is_failure(self) -> bool {
        self == MemcheckStatus::Failed
    }
}

impl fmt::Display for MemcheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recorded result of processing one preset.
///
/// `elapsed` is only set when all three stages passed.
///
/// 处理单个预设的记录结果。仅当三个阶段全部通过时才会设置 `elapsed`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetOutcome {
    pub config: StageStatus,
    pub build: StageStatus,
    pub test: StageStatus,
    pub elapsed: Option<Duration>,
}

impl PresetOutcome {
    pub fn status(&self, stage: Stage) -> StageStatus {
        match stage {
            Stage::Configure => self.config,
            Stage::Build => self.build,
            Stage::Test => self.test,
        }
    }

    /// Records the terminal status of a stage. A stage is only ever recorded once.
    pub fn record(&mut self, stage: Stage, status: StageStatus) {
        let slot = match stage {
            Stage::Configure => &mut self.config,
            Stage::Build => &mut self.build,
            Stage::Test => &mut self.test,
        };
        debug_assert_eq!(*slot, StageStatus::Pending, "{stage} recorded twice");
        *slot = status;
    }

    pub fn is_failure(&self) -> bool {
        Stage::ALL.iter().any(|stage| self.status(*stage).is_failed())
    }

    pub fn is_success(&self) -> bool {
        Stage::ALL.iter().all(|stage| self.status(*stage).is_passed())
    }
}

/// Everything a run produced: one outcome per preset in matrix order, the
/// memory-check status and where the logs were written.
///
/// 一次运行产生的全部结果：按矩阵顺序排列的每个预设结果、内存检查状态以及日志写入位置。
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcomes: Vec<(Preset, PresetOutcome)>,
    pub memcheck: MemcheckStatus,
    pub log_dir: PathBuf,
}

impl RunReport {
    pub fn outcome(&self, preset: &str) -> Option<&PresetOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| p.as_str() == preset)
            .map(|(_, outcome)| outcome)
    }

    /// `true` if any stage of any preset, or the memory check, failed.
    /// Skipped memory checks and pending stages are not failures.
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|(_, outcome)| outcome.is_failure()) || self.memcheck.is_failure()
    }

    /// The process exit code for CI gating: 1 on any failure, 0 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.has_failures() { 1 } else { 0 }
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failure()).count()
    }
}

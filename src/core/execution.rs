//! # Matrix Execution Engine Module / 矩阵执行引擎模块
//!
//! This module drives the whole run. The [`Orchestrator`] walks the presets in
//! matrix order, pushes each one through configure, build and test using a
//! [`StageRunner`], stops a preset at its first failing stage, then runs the
//! memory check and hands back a [`RunReport`].
//!
//! Everything is sequential: every stage is awaited before the next one is
//! created, so a preset's build tree and the log directory are never touched
//! by two commands at once.
//!
//! 此模块驱动整个运行过程。[`Orchestrator`] 按矩阵顺序遍历预设，通过 [`StageRunner`]
//! 依次执行配置、构建和测试，在第一个失败阶段处停止该预设，随后运行内存检查并返回
//! [`RunReport`]。所有操作都是串行的。

use anyhow::Result;
use colored::*;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::{
    core::{
        command::StageCommand,
        config::MatrixConfig,
        models::{
            MEMCHECK_LOG_FILE, MemcheckStatus, Preset, PresetOutcome, RunReport, StageStatus,
        },
        stage::PresetState,
    },
    infra::{command, t},
};

/// Executes one external command into one log file.
///
/// Implementations return the command's raw exit code; interpreting it is the
/// orchestrator's job. An `Err` means the log itself could not be written and
/// is treated as a failed stage.
///
/// 将一个外部命令的输出写入一个日志文件并执行。实现者返回命令的原始退出码，
/// 由编排器负责解释。
pub trait StageRunner {
    fn run(
        &mut self,
        command: &StageCommand,
        log_path: &Path,
    ) -> impl Future<Output = Result<i32>>;
}

/// Runs stages as real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessStageRunner {
    timeout: Option<Duration>,
}

impl ProcessStageRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl StageRunner for ProcessStageRunner {
    async fn run(&mut self, command: &StageCommand, log_path: &Path) -> Result<i32> {
        command::spawn_to_log(command, log_path, self.timeout).await
    }
}

/// Runs the full preset matrix and aggregates the results.
pub struct Orchestrator<R> {
    config: MatrixConfig,
    project_root: PathBuf,
    log_dir: PathBuf,
    runner: R,
}

impl<R: StageRunner> Orchestrator<R> {
    /// `log_dir` must already exist.
    pub fn new(config: MatrixConfig, project_root: PathBuf, log_dir: PathBuf, runner: R) -> Self {
        Self {
            config,
            project_root,
            log_dir,
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs every preset in order, then the memory check.
    ///
    /// Stage failures never abort the run; they only end processing of the
    /// preset they belong to. The only errors returned are command templates
    /// that fail to render.
    pub async fn run_all(&mut self) -> Result<RunReport> {
        let presets = self.config.presets.clone();
        let mut outcomes = Vec::with_capacity(presets.len());

        for preset in presets {
            let outcome = self.run_preset(&preset).await?;
            outcomes.push((preset, outcome));
        }

        let memcheck = self.run_memcheck().await?;

        Ok(RunReport {
            outcomes,
            memcheck,
            log_dir: self.log_dir.clone(),
        })
    }

    /// Pushes one preset through its state machine until it is done.
    pub async fn run_preset(&mut self, preset: &Preset) -> Result<PresetOutcome> {
        println!("{}", t!("run.running_preset", preset = preset).bold());

        let started = Instant::now();
        let mut outcome = PresetOutcome::default();
        let mut state = PresetState::NotStarted.start();

        while let Some(stage) = state.stage() {
            let command = self.config.stage_command(preset, stage, &self.project_root)?;
            let log_path = self.log_dir.join(preset.log_file_name(stage));

            let stage_started = Instant::now();
            let code = self.invoke(&stage.to_string(), &command, &log_path).await;
            let status = StageStatus::from_exit_code(code);
            if status.is_passed() {
                println!(
                    "{}",
                    t!(
                        "run.stage_passed",
                        stage = stage,
                        duration = format!("{:.1}", stage_started.elapsed().as_secs_f64())
                    )
                    .green()
                );
            }

            outcome.record(stage, status);
            state = state.advance(code);
        }

        if state == PresetState::DoneOk {
            outcome.elapsed = Some(started.elapsed());
        }
        Ok(outcome)
    }

    /// Runs the memory check if anything exists at the designated preset's build path.
    pub async fn run_memcheck(&mut self) -> Result<MemcheckStatus> {
        println!("{}", t!("run.running_memcheck").bold());

        let Some(preset) = self.config.memcheck_preset() else {
            return Ok(MemcheckStatus::Skipped);
        };
        let build_dir = self.config.build_dir(&self.project_root, preset);
        if !build_dir.exists() {
            println!(
                "{}",
                t!("run.memcheck_skipped", path = build_dir.display()).dimmed()
            );
            return Ok(MemcheckStatus::Skipped);
        }

        let command = self.config.memcheck_command(&build_dir, &self.project_root)?;
        let log_path = self.log_dir.join(MEMCHECK_LOG_FILE);
        let code = self.invoke("memcheck", &command, &log_path).await;
        Ok(MemcheckStatus::from_exit_code(code))
    }

    /// Runs a command and reports a failing exit code; a runner error counts as failure.
    async fn invoke(&mut self, label: &str, command: &StageCommand, log_path: &Path) -> i32 {
        match self.runner.run(command, log_path).await {
            Ok(0) => 0,
            Ok(code) => {
                println!(
                    "{}",
                    t!(
                        "run.stage_failed",
                        stage = label,
                        code = code,
                        log = log_path.display()
                    )
                    .red()
                );
                code
            }
            Err(e) => {
                println!(
                    "{}",
                    t!("run.stage_error", stage = label, error = format!("{e:#}")).red()
                );
                -1
            }
        }
    }
}

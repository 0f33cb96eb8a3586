// Shared test helpers for integration tests
#![allow(dead_code)]

use anyhow::Result;
use preset_matrix::core::command::StageCommand;
use preset_matrix::core::config::MatrixConfig;
use preset_matrix::core::execution::{Orchestrator, StageRunner};
use preset_matrix::core::models::{RunReport, StageStatus};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// One recorded invocation of the fake runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub command: StageCommand,
    /// File name of the log the stage was pointed at, e.g. `gcc-debug_build.log`.
    pub log: String,
}

/// A `StageRunner` that never spawns anything. Every call is recorded and
/// answered with exit code 0 unless an override is registered for its log name.
#[derive(Debug, Default)]
pub struct FakeRunner {
    pub calls: Vec<Call>,
    exit_codes: HashMap<String, i32>,
    broken_logs: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the stage writing `log` exit with `code`.
    pub fn exit_with(mut self, log: &str, code: i32) -> Self {
        self.exit_codes.insert(log.to_string(), code);
        self
    }

    /// Makes the stage writing `log` fail to produce its log at all.
    pub fn broken_log(mut self, log: &str) -> Self {
        self.broken_logs.push(log.to_string());
        self
    }

    pub fn logs(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.log.as_str()).collect()
    }

    pub fn logs_for(&self, preset: &str) -> Vec<&str> {
        let prefix = format!("{preset}_");
        self.calls
            .iter()
            .map(|c| c.log.as_str())
            .filter(|log| log.starts_with(&prefix))
            .collect()
    }
}

impl StageRunner for FakeRunner {
    async fn run(&mut self, command: &StageCommand, log_path: &Path) -> Result<i32> {
        let log = log_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.push(Call {
            command: command.clone(),
            log: log.clone(),
        });
        if self.broken_logs.contains(&log) {
            anyhow::bail!("Failed to create log file: {}", log_path.display());
        }
        Ok(self.exit_codes.get(&log).copied().unwrap_or(0))
    }
}

/// A throwaway project root with an existing `build/logs` directory.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        fs::create_dir_all(dir.path().join("build").join("logs"))
            .expect("Failed to create log directory");
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn log_dir(&self) -> PathBuf {
        self.dir.path().join("build").join("logs")
    }

    /// Creates the build tree that gates the memory check.
    pub fn with_build_dir(self, preset: &str) -> Self {
        fs::create_dir_all(self.dir.path().join("build").join(preset))
            .expect("Failed to create build directory");
        self
    }

    /// Puts a regular file where the build tree of `preset` would be.
    pub fn with_build_file(self, preset: &str) -> Self {
        let build = self.dir.path().join("build");
        fs::create_dir_all(&build).expect("Failed to create build directory");
        fs::write(build.join(preset), "").expect("Failed to create build file");
        self
    }

    pub fn orchestrator<R: StageRunner>(&self, config: MatrixConfig, runner: R) -> Orchestrator<R> {
        Orchestrator::new(config, self.root(), self.log_dir(), runner)
    }
}

/// The statuses of a report with timings stripped, for structural comparison.
pub fn statuses(report: &RunReport) -> Vec<(String, [StageStatus; 3])> {
    report
        .outcomes
        .iter()
        .map(|(preset, o)| (preset.to_string(), [o.config, o.build, o.test]))
        .collect()
}

/// Writes a matrix config to `<dir>/matrix.toml` and returns its path.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("matrix.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

//! # Matrix Configuration / 矩阵配置
//!
//! The matrix is fixed, compiled-in data: eleven CMake presets, the four
//! command templates and a handful of knobs. A TOML file can override any of
//! these; fields left out fall back to the built-in values.
//!
//! 矩阵是编译期固定的数据：十一个 CMake 预设、四个命令模板和少量参数。
//! 可以通过 TOML 文件覆盖其中任意一项；未提供的字段回退到内置值。
//!
//! ```toml
//! presets = ["gcc-debug", "clang-release"]
//! jobs = 4
//! stage_timeout_secs = 1800
//!
//! [commands]
//! build = "cmake --build --preset {preset} -j{jobs} --verbose"
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::command::{CommandTemplate, StageCommand, TemplateVars};
use crate::core::models::{Preset, Stage};
use crate::infra::t;

/// The presets run when no configuration file overrides them, in run order.
pub const DEFAULT_PRESETS: [&str; 11] = [
    "gcc-debug",
    "gcc-release",
    "gcc-asan",
    "gcc-tsan",
    "gcc-coverage",
    "clang-debug",
    "clang-release",
    "clang-asan",
    "clang-tsan",
    "clang-ubsan",
    "clang-coverage",
];

pub const DEFAULT_JOBS: u32 = 2;
pub const DEFAULT_BUILD_ROOT: &str = "build";
pub const DEFAULT_LOG_DIR: &str = "build/logs";

/// Command templates for the four kinds of stage.
/// 四种阶段对应的命令模板。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandTemplates {
    pub configure: CommandTemplate,
    pub build: CommandTemplate,
    pub test: CommandTemplate,
    pub memcheck: CommandTemplate,
}

impl Default for CommandTemplates {
    fn default() -> Self {
        Self {
            configure: "cmake --preset {preset}".into(),
            build: "cmake --build --preset {preset} -j{jobs}".into(),
            test: "ctest --preset {preset}".into(),
            memcheck: "ctest -T memcheck --test-dir {build_dir}".into(),
        }
    }
}

impl CommandTemplates {
    pub fn for_stage(&self, stage: Stage) -> &CommandTemplate {
        match stage {
            Stage::Configure => &self.configure,
            Stage::Build => &self.build,
            Stage::Test => &self.test,
        }
    }
}

/// The complete matrix configuration.
/// 完整的矩阵配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixConfig {
    /// Language for progress messages (e.g. "en", "zh-CN").
    /// Detected from the system when not set.
    ///
    /// 进度消息的语言（例如 "en", "zh-CN"）。未设置时从系统检测。
    pub language: Option<String>,

    /// Presets in the order they are run. Names must be unique.
    /// 按运行顺序排列的预设。名称必须唯一。
    pub presets: Vec<Preset>,

    /// Parallelism hint passed to the build command through `{jobs}`.
    pub jobs: u32,

    /// Directory holding the per-preset build trees, relative to the project root.
    pub build_root: String,

    /// Where log artifacts go. Relative paths are resolved against the project
    /// root; `~` and environment variables are expanded.
    pub log_dir: String,

    /// The preset whose build tree the memory check inspects. Defaults to the
    /// first preset with "debug" in its name.
    pub memcheck_preset: Option<Preset>,

    /// Kill a stage that runs longer than this. No limit when unset.
    /// 阶段运行超过此时间将被终止。未设置时不限制。
    pub stage_timeout_secs: Option<u64>,

    pub commands: CommandTemplates,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            language: None,
            presets: DEFAULT_PRESETS.iter().copied().map(Preset::from).collect(),
            jobs: DEFAULT_JOBS,
            build_root: DEFAULT_BUILD_ROOT.to_string(),
            log_dir: DEFAULT_LOG_DIR.to_string(),
            memcheck_preset: None,
            stage_timeout_secs: None,
            commands: CommandTemplates::default(),
        }
    }
}

impl MatrixConfig {
    /// Checks the invariants the orchestrator relies on.
    pub fn validate(&self) -> Result<()> {
        if self.presets.is_empty() {
            bail!("The matrix must contain at least one preset.");
        }

        let mut seen = HashSet::new();
        for preset in &self.presets {
            if preset.as_str().trim().is_empty() {
                bail!("Preset names must not be empty.");
            }
            if !seen.insert(preset.as_str()) {
                bail!("Duplicate preset in matrix: {}", preset);
            }
        }

        if self.jobs == 0 {
            bail!("`jobs` must be at least 1.");
        }
        if self.stage_timeout_secs == Some(0) {
            bail!("`stage_timeout_secs` must be at least 1 when set.");
        }

        if let Some(preset) = &self.memcheck_preset {
            if !seen.contains(preset.as_str()) {
                bail!("Memcheck preset `{}` is not part of the matrix.", preset);
            }
        }

        for (name, template) in [
            ("configure", &self.commands.configure),
            ("build", &self.commands.build),
            ("test", &self.commands.test),
            ("memcheck", &self.commands.memcheck),
        ] {
            template
                .tokens()
                .with_context(|| format!("Invalid `{name}` command template"))?;
        }

        Ok(())
    }

    pub fn stage_timeout(&self) -> Option<Duration> {
        self.stage_timeout_secs.map(Duration::from_secs)
    }

    /// The preset gating the memory check: the configured one, or the first
    /// debug-flavoured preset in the matrix.
    pub fn memcheck_preset(&self) -> Option<&Preset> {
        self.memcheck_preset
            .as_ref()
            .or_else(|| self.presets.iter().find(|p| p.as_str().contains("debug")))
    }

    /// Build tree of a preset, e.g. `<root>/build/gcc-debug`.
    pub fn build_dir(&self, project_root: &Path, preset: &Preset) -> PathBuf {
        project_root.join(&self.build_root).join(preset.as_str())
    }

    pub fn stage_command(
        &self,
        preset: &Preset,
        stage: Stage,
        project_root: &Path,
    ) -> Result<StageCommand> {
        let vars = TemplateVars {
            preset: Some(preset.as_str()),
            jobs: Some(self.jobs),
            build_dir: None,
        };
        self.commands
            .for_stage(stage)
            .render(&vars, project_root.to_path_buf())
    }

    pub fn memcheck_command(&self, build_dir: &Path, project_root: &Path) -> Result<StageCommand> {
        let build_dir = build_dir.to_string_lossy();
        let vars = TemplateVars {
            preset: self.memcheck_preset().map(Preset::as_str),
            jobs: Some(self.jobs),
            build_dir: Some(&build_dir),
        };
        self.commands
            .memcheck
            .render(&vars, project_root.to_path_buf())
    }
}

/// Parses and validates a configuration from TOML text.
pub fn parse_matrix_config(content: &str) -> Result<MatrixConfig> {
    let config: MatrixConfig =
        toml::from_str(content).with_context(|| t!("config.parse_failed").to_string())?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates a configuration file.
/// 读取、解析并校验配置文件。
pub fn load_matrix_config(path: &Path) -> Result<MatrixConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| t!("config.read_failed", path = path.display()).to_string())?;
    parse_matrix_config(&content)
}

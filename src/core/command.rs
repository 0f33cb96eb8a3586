//! # Stage Commands / 阶段命令
//!
//! Command templates are kept as plain strings in the configuration and turned
//! into structured [`StageCommand`] descriptors (program, arguments, working
//! directory) right before a stage runs. Templates are tokenised with `shlex`
//! first and placeholders are substituted per token afterwards, so a preset
//! name or path containing spaces never changes the argument layout.
//!
//! 命令模板在配置中以字符串形式保存，并在阶段运行前转换为结构化的
//! [`StageCommand`]（程序、参数、工作目录）。模板先由 `shlex` 切分，
//! 之后再逐个参数替换占位符，因此含空格的预设名或路径不会改变参数结构。

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl StageCommand {
    /// Program followed by its arguments.
    pub fn argv(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

impl fmt::Display for StageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match shlex::try_join(self.argv()) {
            Ok(joined) => f.write_str(&joined),
            // Only fails on interior NUL bytes; fall back to a lossy rendering.
            Err(_) => f.write_str(&self.argv().collect::<Vec<_>>().join(" ")),
        }
    }
}

/// Values available to a template. `None` leaves the placeholder untouched.
/// 模板可用的变量。`None` 表示保留占位符原样。
#[derive(Debug, Clone, Default)]
pub struct TemplateVars<'a> {
    pub preset: Option<&'a str>,
    pub jobs: Option<u32>,
    pub build_dir: Option<&'a str>,
}

/// A command line with `{preset}`, `{jobs}` and `{build_dir}` placeholders,
/// e.g. `cmake --build --preset {preset} -j{jobs}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate(String);

impl CommandTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Splits the template into tokens, rejecting unbalanced quotes and empty commands.
    pub fn tokens(&self) -> Result<Vec<String>> {
        let Some(tokens) = shlex::split(&self.0) else {
            bail!("Failed to parse command template: {}", self.0);
        };
        if tokens.first().is_none_or(|program| program.is_empty()) {
            bail!("Command template has no program: {:?}", self.0);
        }
        Ok(tokens)
    }

    /// Builds the command descriptor for one invocation.
    pub fn render(&self, vars: &TemplateVars<'_>, cwd: PathBuf) -> Result<StageCommand> {
        let jobs = vars.jobs.map(|j| j.to_string());
        let mut argv = self.tokens()?.into_iter().map(|mut token| {
            if let Some(preset) = vars.preset {
                token = token.replace("{preset}", preset);
            }
            if let Some(jobs) = &jobs {
                token = token.replace("{jobs}", jobs);
            }
            if let Some(build_dir) = vars.build_dir {
                token = token.replace("{build_dir}", build_dir);
            }
            token
        });

        // `tokens()` guarantees at least one element.
        let program = argv.next().unwrap_or_default();
        Ok(StageCommand {
            program,
            args: argv.collect(),
            cwd,
        })
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

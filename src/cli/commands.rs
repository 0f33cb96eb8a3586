//! Subcommands of the `preset-matrix` binary.

pub mod list;
pub mod run;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::{
    cli::RunOptions,
    core::config::{self, MatrixConfig},
    infra::{fs, t},
};

/// Everything a command needs before touching the build tools.
#[derive(Debug)]
pub struct Workspace {
    pub config: MatrixConfig,
    pub project_root: PathBuf,
    /// Resolved, but not necessarily created yet.
    pub log_dir: PathBuf,
}

/// Loads the configuration (built-in unless `--config` is given), applies its
/// language unless `--lang` was passed, and resolves the project root and log
/// directory.
pub fn prepare_workspace(options: &RunOptions) -> Result<Workspace> {
    let config = match &options.config {
        Some(path) => {
            println!("{}", t!("run.loading_config", path = path.display()));
            config::load_matrix_config(path)?
        }
        None => MatrixConfig::default(),
    };

    if options.lang.is_none() {
        if let Some(language) = &config.language {
            crate::init(Some(language));
        }
    }

    let project_root = fs::absolute_path(&options.project_dir).with_context(|| {
        t!("config.project_dir_not_found", path = options.project_dir.display()).to_string()
    })?;
    let log_dir = fs::resolve_log_dir(&project_root, &config.log_dir)?;

    Ok(Workspace {
        config,
        project_root,
        log_dir,
    })
}

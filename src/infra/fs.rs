//! # File System Operations Module / 文件系统操作模块
//!
//! This module resolves the project root and the log directory and creates
//! the latter before the first stage runs.
//!
//! 此模块负责解析项目根目录和日志目录，并在第一个阶段运行前创建日志目录。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::t;

/// Resolves the configured log directory against the project root.
///
/// `~` and `$VAR` references are expanded; relative paths are joined onto
/// `project_root`. Nothing is created here.
///
/// # Arguments
/// * `project_root` - Absolute path of the project root
/// * `configured` - The `log_dir` value from the configuration
///
/// # Returns
/// The path where log artifacts will be written
pub fn resolve_log_dir(project_root: &Path, configured: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(configured)
        .with_context(|| format!("Failed to expand log directory: {configured}"))?;
    let path = PathBuf::from(expanded.as_ref());
    Ok(if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    })
}

/// Creates `path` and any missing parents, returning its canonical form.
///
/// # Arguments
/// * `path` - Directory to create
///
/// # Returns
/// The canonicalized directory path, or an error if it could not be created
pub fn ensure_log_dir(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path)
        .with_context(|| t!("config.log_dir_failed", path = path.display()).to_string())?;
    absolute_path(path)
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

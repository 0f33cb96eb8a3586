//! # Preset Matrix Library / Preset Matrix 库
//!
//! This library provides the core functionality for the `preset-matrix` tool,
//! which runs every CMake preset through configure, build and test, runs a
//! memory check on the debug build, and reports a single CI verdict.
//!
//! 此库为 `preset-matrix` 工具提供核心功能：对每个 CMake 预设依次执行配置、
//! 构建和测试，对调试构建执行内存检查，并给出单一的 CI 结论。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, configuration and the orchestration loop
//! - `infra` - Process execution into log files and file system helpers
//! - `reporting` - Console table and HTML report
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、配置和编排循环
//! - `infra` - 将进程输出写入日志文件以及文件系统辅助功能
//! - `reporting` - 控制台表格和 HTML 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::execution;
pub use core::models;

/// Picks the language for progress messages.
///
/// An explicitly requested language wins; otherwise the system locale is
/// used. The full locale (e.g. "zh-CN") is tried first, then just the
/// language code (e.g. "en" from "en-US"), and finally "en".
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

/// Sets the process-wide message language.
pub fn init(requested: Option<&str>) {
    rust_i18n::set_locale(&resolve_locale(requested));
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the preset matrix runner,
//! namely process execution into log files and file system helpers.
//!
//! 此模块为预设矩阵运行器提供基础设施服务，
//! 即将进程输出写入日志文件的执行功能和文件系统辅助功能。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;

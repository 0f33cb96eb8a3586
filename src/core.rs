//! # Core Module / 核心模块
//!
//! This module contains the core of the preset matrix runner: the data
//! models, the matrix configuration, the per-preset state machine and the
//! orchestration loop.
//!
//! 此模块包含预设矩阵运行器的核心：数据模型、矩阵配置、
//! 每个预设的状态机以及编排循环。

pub mod command;
pub mod config;
pub mod execution;
pub mod models;
pub mod stage;

// Re-exports
pub use config::MatrixConfig;
pub use execution::{Orchestrator, ProcessStageRunner, StageRunner};
pub use models::RunReport;

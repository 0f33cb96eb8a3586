//! # Run Command Module / 运行命令模块
//!
//! This module implements the default `run` command: it prepares the log
//! directory, drives the orchestrator over the whole matrix, prints the
//! verification report and turns the result into the process exit code.
//!
//! 此模块实现默认的 `run` 命令：准备日志目录，驱动编排器运行整个矩阵，
//! 打印验证报告并将结果转换为进程退出码。

use anyhow::Result;
use colored::*;
use std::process::ExitCode;

use crate::{
    cli::{
        RunOptions,
        commands::{Workspace, prepare_workspace},
    },
    core::execution::{Orchestrator, ProcessStageRunner},
    infra::{fs, t},
    reporting::{generate_html_report, print_report},
};

/// Executes the run command with the provided options.
///
/// # Returns
/// `ExitCode` 0 when every stage passed (or the memory check was skipped),
/// 1 when anything failed. Errors are reserved for setup problems that stop
/// the run before the first preset, such as an unusable log directory.
pub async fn execute(options: &RunOptions) -> Result<ExitCode> {
    let Workspace {
        config,
        project_root,
        log_dir,
    } = prepare_workspace(options)?;

    let log_dir = fs::ensure_log_dir(&log_dir)?;

    println!("{}", t!("run.project_root", path = project_root.display()));
    if options.config.is_none() {
        println!(
            "{}",
            t!("run.builtin_matrix", count = config.presets.len()).cyan()
        );
    }

    let runner = ProcessStageRunner::new(config.stage_timeout());
    let mut orchestrator = Orchestrator::new(config, project_root, log_dir, runner);
    let report = orchestrator.run_all().await?;

    print_report(&report);

    if let Some(report_path) = &options.html {
        println!("\n{}", t!("run.html_generating", path = report_path.display()));
        if let Err(e) = generate_html_report(&report, report_path) {
            eprintln!("{} {:#}", t!("run.html_failed").red(), e);
        }
    }

    if report.has_failures() {
        println!("\n{}", t!("run.failed").red().bold());
    } else {
        println!("\n{}", t!("run.all_passed").green().bold());
    }

    Ok(ExitCode::from(report.exit_code()))
}

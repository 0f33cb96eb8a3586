//! # Console Reporting Module / 控制台报告模块
//!
//! Renders the verification report table printed at the end of a run.
//! The layout (headers, column widths, status words) is fixed and not
//! translated, so CI scripts can grep it.
//!
//! 渲染运行结束时打印的验证报告表格。
//! 表格布局（表头、列宽、状态词）固定且不做翻译，便于 CI 脚本进行文本匹配。

use colored::*;
use std::fmt::Write;
use std::time::Duration;

use crate::core::models::{MemcheckStatus, RunReport, Stage, StageStatus};

const REPORT_WIDTH: usize = 70;

/// Prints the report to stdout, colouring status cells when the terminal supports it.
///
/// # Output Format / 输出格式
/// ```text
/// ======================================================================
///                     VERIFICATION REPORT
/// ======================================================================
/// PRESET          | CONFIG   | BUILD    | TEST     | TIME
/// ----------------------------------------------------------------------
/// gcc-debug       | PASSED   | PASSED   | PASSED   | 42.7s
/// gcc-release     | PASSED   | FAILED   | PENDING  | -
/// ----------------------------------------------------------------------
/// Valgrind        | SKIPPED
/// ======================================================================
/// Logs directory: /work/project/build/logs
/// ======================================================================
/// ```
pub fn print_report(report: &RunReport) {
    println!();
    print!("{}", render_report(report, true));
}

/// Renders the report table. With `color` set, status cells carry ANSI colours
/// (subject to `colored`'s terminal detection).
///
/// 渲染报告表格。当 `color` 为真时，状态单元格带有 ANSI 颜色。
pub fn render_report(report: &RunReport, color: bool) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(REPORT_WIDTH);
    let light = "-".repeat(REPORT_WIDTH);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "                    VERIFICATION REPORT");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(
        out,
        "{:<15} | {:<8} | {:<8} | {:<8} | {:<10}",
        "PRESET",
        Stage::Configure.header(),
        Stage::Build.header(),
        Stage::Test.header(),
        "TIME"
    );
    let _ = writeln!(out, "{light}");

    for (preset, outcome) in &report.outcomes {
        let _ = writeln!(
            out,
            "{:<15} | {} | {} | {} | {:<10}",
            preset.as_str(),
            stage_cell(outcome.config, color),
            stage_cell(outcome.build, color),
            stage_cell(outcome.test, color),
            format_elapsed(outcome.elapsed)
        );
    }

    let _ = writeln!(out, "{light}");
    let _ = writeln!(
        out,
        "{:<15} | {}",
        "Valgrind",
        memcheck_cell(report.memcheck, color)
    );
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "Logs directory: {}", report.log_dir.display());
    let _ = writeln!(out, "{heavy}");
    out
}

/// One decimal place with an `s` suffix, or `-` when there is no time to show.
pub fn format_elapsed(elapsed: Option<Duration>) -> String {
    match elapsed {
        Some(d) if !d.is_zero() => format!("{:.1}s", d.as_secs_f64()),
        _ => "-".to_string(),
    }
}

fn stage_cell(status: StageStatus, color: bool) -> String {
    let padded = format!("{:<8}", status.as_str());
    if !color {
        return padded;
    }
    match status {
        StageStatus::Passed => padded.green().to_string(),
        StageStatus::Failed => padded.red().bold().to_string(),
        StageStatus::Pending => padded.dimmed().to_string(),
    }
}

fn memcheck_cell(status: MemcheckStatus, color: bool) -> String {
    let padded = format!("{:<39}", status.as_str());
    if !color {
        return padded;
    }
    match status {
        MemcheckStatus::Passed => padded.green().to_string(),
        MemcheckStatus::Failed => padded.red().bold().to_string(),
        MemcheckStatus::Skipped => padded.yellow().to_string(),
    }
}

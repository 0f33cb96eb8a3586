//! # Reporting Unit Tests / 报告单元测试
//!
//! Checks the console table layout and the HTML report contents.
//!
//! 检查控制台表格布局和 HTML 报告内容。

use preset_matrix::core::models::{MemcheckStatus, Preset, PresetOutcome, RunReport, StageStatus};
use preset_matrix::reporting::console::{format_elapsed, render_report};
use preset_matrix::reporting::html::{generate_html_report, render_html_report};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn sample_report() -> RunReport {
    RunReport {
        outcomes: vec![
            (
                Preset::from("gcc-debug"),
                PresetOutcome {
                    config: StageStatus::Passed,
                    build: StageStatus::Passed,
                    test: StageStatus::Passed,
                    elapsed: Some(Duration::from_millis(12_345)),
                },
            ),
            (
                Preset::from("gcc-release"),
                PresetOutcome {
                    config: StageStatus::Passed,
                    build: StageStatus::Failed,
                    test: StageStatus::Pending,
                    elapsed: None,
                },
            ),
            (
                Preset::from("clang-asan"),
                PresetOutcome {
                    config: StageStatus::Failed,
                    ..PresetOutcome::default()
                },
            ),
        ],
        memcheck: MemcheckStatus::Skipped,
        log_dir: PathBuf::from("/work/project/build/logs"),
    }
}

#[cfg(test)]
mod console_tests {
    use super::*;

    #[test]
    fn test_elapsed_formatting() {
        assert_eq!(format_elapsed(Some(Duration::from_millis(12_345))), "12.3s");
        assert_eq!(format_elapsed(Some(Duration::from_millis(60))), "0.1s");
        assert_eq!(format_elapsed(Some(Duration::from_secs(90))), "90.0s");
        assert_eq!(format_elapsed(Some(Duration::ZERO)), "-");
        assert_eq!(format_elapsed(None), "-");
    }

    #[test]
    fn test_plain_table_layout() {
        let rendered = render_report(&sample_report(), false);
        let lines: Vec<&str> = rendered.lines().map(str::trim_end).collect();

        let heavy = "=".repeat(70);
        let light = "-".repeat(70);
        let expected = vec![
            heavy.as_str(),
            "                    VERIFICATION REPORT",
            heavy.as_str(),
            "PRESET          | CONFIG   | BUILD    | TEST     | TIME",
            light.as_str(),
            "gcc-debug       | PASSED   | PASSED   | PASSED   | 12.3s",
            "gcc-release     | PASSED   | FAILED   | PENDING  | -",
            "clang-asan      | FAILED   | PENDING  | PENDING  | -",
            light.as_str(),
            "Valgrind        | SKIPPED",
            heavy.as_str(),
            "Logs directory: /work/project/build/logs",
            heavy.as_str(),
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_plain_table_has_no_escape_codes() {
        let rendered = render_report(&sample_report(), false);
        assert!(!rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_memcheck_row_reflects_status() {
        let mut report = sample_report();
        report.memcheck = MemcheckStatus::Failed;
        let rendered = render_report(&report, false);
        assert!(rendered.contains("Valgrind        | FAILED"));
    }
}

#[cfg(test)]
mod html_tests {
    use super::*;

    #[test]
    fn test_html_report_contains_every_preset_and_status() {
        let html = render_html_report(&sample_report(), "2026-01-01 00:00:00").into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        for preset in ["gcc-debug", "gcc-release", "clang-asan"] {
            assert!(html.contains(preset), "missing {preset}");
        }
        assert!(html.contains("status-FAILED"));
        assert!(html.contains("status-PENDING"));
        assert!(html.contains("status-SKIPPED"));
        assert!(html.contains("12.3s"));
        assert!(html.contains("2026-01-01 00:00:00"));
        assert!(html.contains("/work/project/build/logs"));
    }

    #[test]
    fn test_html_escapes_preset_names() {
        let mut report = sample_report();
        report.outcomes[0].0 = Preset::from("<odd>");
        let html = render_html_report(&report, "now").into_string();
        assert!(html.contains("&lt;odd&gt;"));
        assert!(!html.contains("<odd>"));
    }

    #[test]
    fn test_generate_html_report_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.html");

        generate_html_report(&sample_report(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Preset Matrix Report"));
        assert!(content.contains("clang-asan"));
    }
}

//! # HTML Reporting Module / HTML 报告模块
//!
//! This module writes a standalone HTML version of the verification report:
//! summary counters, one table row per preset and the memory-check outcome.
//!
//! 此模块生成独立的 HTML 版验证报告：汇总计数、每个预设一行的表格以及内存检查结果。

use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

use crate::core::models::{RunReport, Stage};
use crate::infra::t;
use crate::reporting::console::format_elapsed;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Writes the HTML report for `report` to `output_path`.
///
/// # Arguments / 参数
/// * `report` - The finished run / 已完成的运行结果
/// * `output_path` - Where the HTML file is written / HTML 文件的写入路径
///
/// # Errors / 错误
/// Returns an error if the file cannot be written.
/// 如果无法写入文件则返回错误。
pub fn generate_html_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let markup = render_html_report(report, &generated_at);
    fs::write(output_path, markup.into_string())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}

/// Builds the report markup. `generated_at` is shown under the title.
pub fn render_html_report(report: &RunReport, generated_at: &str) -> Markup {
    let page_title = t!("html_report.title").to_string();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (page_title) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (page_title) }
                p.generated { (t!("html_report.generated_at", time = generated_at).to_string()) }

                div.summary-container {
                    div.summary-item {
                        span.count { (report.outcomes.len()) }
                        span.label { (t!("html_report.total").to_string()) }
                    }
                    div.summary-item {
                        span.count.passed-text { (report.passed_count()) }
                        span.label { (t!("html_report.passed").to_string()) }
                    }
                    div.summary-item {
                        span.count.failed-text { (report.failed_count()) }
                        span.label { (t!("html_report.failed").to_string()) }
                    }
                    div.summary-item {
                        span class=(format!("count status-{}", report.memcheck.as_str())) {
                            (report.memcheck.as_str())
                        }
                        span.label { (t!("html_report.memcheck").to_string()) }
                    }
                }

                table {
                    thead {
                        tr {
                            th { "PRESET" }
                            @for stage in Stage::ALL {
                                th { (stage.header()) }
                            }
                            th { "TIME" }
                        }
                    }
                    tbody {
                        @for (preset, outcome) in &report.outcomes {
                            tr {
                                td { (preset.as_str()) }
                                @for stage in Stage::ALL {
                                    @let status = outcome.status(stage);
                                    td class=(format!("status-{}", status.as_str())) {
                                        (status.as_str())
                                    }
                                }
                                td.time { (format_elapsed(outcome.elapsed)) }
                            }
                        }
                    }
                }

                p.logs {
                    (t!("html_report.logs").to_string()) ": " (report.log_dir.display().to_string())
                }
            }
        }
    }
}

//! # Reporting Module / 报告模块
//!
//! This module renders the finished run: the fixed-layout verification table
//! printed to the console and an optional HTML report file.
//!
//! 此模块负责呈现运行结果：打印到控制台的固定布局验证表格，以及可选的 HTML 报告文件。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use console::{print_report, render_report};
pub use html::generate_html_report;

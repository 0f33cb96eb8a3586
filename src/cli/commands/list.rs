//! # List Command Module / 列表命令模块
//!
//! Prints the resolved matrix, one block per preset with the exact commands
//! each stage would run, without running anything.
//!
//! 打印解析后的矩阵：每个预设一段，列出每个阶段将要执行的确切命令，但不执行任何操作。

use anyhow::Result;
use colored::*;

use crate::{
    cli::{
        RunOptions,
        commands::{Workspace, prepare_workspace},
    },
    core::models::Stage,
    infra::t,
};

pub fn execute(options: &RunOptions) -> Result<()> {
    let Workspace {
        config,
        project_root,
        log_dir,
    } = prepare_workspace(options)?;

    println!(
        "{}",
        t!(
            "list.header",
            count = config.presets.len(),
            path = log_dir.display()
        )
        .bold()
    );

    for preset in &config.presets {
        println!("\n{}", preset.as_str().cyan());
        for stage in Stage::ALL {
            let command = config.stage_command(preset, stage, &project_root)?;
            println!("  {:<9} {}", stage.to_string(), command);
        }
    }

    if let Some(preset) = config.memcheck_preset() {
        let build_dir = config.build_dir(&project_root, preset);
        let command = config.memcheck_command(&build_dir, &project_root)?;
        println!(
            "\n{}",
            t!(
                "list.memcheck",
                command = command,
                path = build_dir.display()
            )
        );
    }

    Ok(())
}

use std::path::PathBuf;

use alk_overview::OverviewFormat;
use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};

/// Options the `read` command runs with, whether flag-supplied or
/// wizard-picked
#[derive(Debug, Clone)]
pub(crate) struct ReadOptions {
    /// Target file; `None` writes to stdout
    pub output: Option<PathBuf>,
    pub format: OverviewFormat,
}

/// Walk the user through the `read` options interactively
pub(crate) fn prompt_for_options() -> Result<ReadOptions> {
    println!(
        "{}",
        style("Welcome to alk! Pick the overview options:").cyan()
    );

    let format_choice = Select::new()
        .with_prompt("Output format")
        .items(&["YAML", "XML"])
        .default(0)
        .interact()?;
    let format = if format_choice == 1 {
        OverviewFormat::Xml
    } else {
        OverviewFormat::Yaml
    };

    let to_file = Confirm::new()
        .with_prompt("Write the overview to a file? (otherwise stdout)")
        .default(true)
        .interact()?;

    let output = if to_file {
        let default_name = format.default_file_name();
        let choice = Select::new()
            .with_prompt("Output file")
            .items(&[format!("Default ({default_name})"), "Custom".to_string()])
            .default(0)
            .interact()?;
        if choice == 1 {
            let custom: String = Input::new().with_prompt("Custom file name").interact_text()?;
            Some(PathBuf::from(custom))
        } else {
            Some(PathBuf::from(default_name))
        }
    } else {
        None
    };

    let options = ReadOptions { output, format };
    println!(
        "{} {}",
        style("Next time, skip the wizard with:").dim(),
        style(shortcut_command(&options)).bold()
    );
    Ok(options)
}

/// The non-interactive command line equivalent to a wizard run
fn shortcut_command(options: &ReadOptions) -> String {
    let mut cmd = format!("alk read --format {}", options.format.as_str());
    if let Some(output) = &options.output {
        cmd.push_str(&format!(" --output {}", output.display()));
    }
    cmd
}

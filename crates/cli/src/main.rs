use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use alk_editor::EditSession;
use alk_overview::generate_overview;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use console::style;

use crate::flags::FormatFlag;
use crate::wizard::ReadOptions;

mod flags;
mod wizard;

#[derive(Parser)]
#[command(name = "alk")]
#[command(about = "Apply model-suggested edits and share project context", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a tagged edit stream to files under the base path
    Edit(EditArgs),

    /// Generate a project overview to paste into a prompt
    Read(ReadArgs),
}

#[derive(Args)]
struct EditArgs {
    /// Read the edit stream from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Base path for resolving relative file paths
    #[arg(long, default_value = ".")]
    base_path: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ReadArgs {
    /// Write the overview to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    format: FormatFlag,

    /// Base path to scan
    #[arg(long, default_value = ".")]
    base_path: PathBuf,

    /// Pick the options interactively
    #[arg(long)]
    wizard: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Edit(args) => run_edit(args).await,
        Commands::Read(args) => run_read(args),
    }
}

async fn run_edit(args: EditArgs) -> Result<()> {
    let session = EditSession::new(&args.base_path);

    let report = match &args.input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read edit stream from {}", path.display()))?;
            session.apply_str(&text)?
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.apply_stream(stdin).await?
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for path in &report.edited {
            println!("{} {}", style("✔").green(), path.display());
        }
        for failure in &report.failures {
            eprintln!(
                "{} {}: {}",
                style("✘").red(),
                failure.path,
                failure.error
            );
        }
    }

    if !report.is_clean() {
        anyhow::bail!("{} file(s) could not be edited", report.failures.len());
    }
    Ok(())
}

fn run_read(args: ReadArgs) -> Result<()> {
    let options = if args.wizard {
        wizard::prompt_for_options()?
    } else {
        ReadOptions {
            output: args.output,
            format: args.format.as_domain(),
        }
    };

    let report = generate_overview(&args.base_path).context("failed to scan project")?;
    let rendered = report.overview.render(options.format)?;

    match &options.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("cannot write overview to {}", path.display()))?;
            println!(
                "{} project overview written to {}",
                style("✔").green(),
                style(path.display()).bold()
            );
        }
        None => print!("{rendered}"),
    }

    if !report.skipped.is_empty() {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for skip in &report.skipped {
            *counts.entry(skip.reason.as_str()).or_default() += 1;
        }
        for (reason, count) in counts {
            eprintln!(
                "{}",
                style(format!("ℹ {count} file(s) skipped: {reason}")).yellow()
            );
        }
    }

    Ok(())
}

mod commands;
mod logging;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use cbatch_service::RunnerConfig;
use commands::{list::ListArgs, run::RunArgs, run_all::RunAllArgs};

/// Compile and run a directory of C programs
#[derive(Parser, Debug)]
#[command(name = "cbatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file (overrides the user config)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the job sources
    #[arg(short = 'd', long = "dir", global = true, value_name = "DIR")]
    jobs_dir: Option<PathBuf>,

    /// Compiler to invoke (overrides config)
    #[arg(long, global = true, value_name = "CC")]
    compiler: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Without a command, the terminal UI is started
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the jobs in the directory
    List(ListArgs),
    /// Compile and run a single job
    Run(RunArgs),
    /// Compile and run every job in the directory
    RunAll(RunAllArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_file.as_deref(), cli.command.is_none())?;

    let mut config = RunnerConfig::load(cli.config.as_deref())?;
    if let Some(compiler) = cli.compiler {
        config = config.with_compiler(compiler);
        config.validate()?;
    }
    if config.locate_compiler().is_none() {
        tracing::warn!(compiler = %config.compiler, "compiler not found on PATH");
    }

    let jobs_dir = cli.jobs_dir.unwrap_or_else(|| config.jobs_dir.clone());

    let all_succeeded = match cli.command {
        None => {
            cbatch_tui::run(config, &jobs_dir).await?;
            true
        }
        Some(Commands::List(args)) => commands::list::execute(args, &config, &jobs_dir)?,
        Some(Commands::Run(args)) => commands::run::execute(args, config, &jobs_dir).await?,
        Some(Commands::RunAll(args)) => {
            commands::run_all::execute(args, config, &jobs_dir).await?
        }
    };

    if !all_succeeded {
        std::process::exit(1);
    }
    Ok(())
}

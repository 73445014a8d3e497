use crate::commands::OutputFormat;
use crate::output;

use std::path::Path;

use clap::Args;
use color_eyre::Result;

use cbatch_service::{discover, validate_directory, RunnerConfig};

/// List the jobs in the directory
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn execute(args: ListArgs, config: &RunnerConfig, jobs_dir: &Path) -> Result<bool> {
    if let Err(e) = validate_directory(jobs_dir) {
        color_eyre::eyre::bail!("{}", e);
    }

    let jobs = discover(jobs_dir, &config.source_suffix);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&jobs)?),
        OutputFormat::Text if jobs.is_empty() => {
            output::warning("No jobs found in the specified directory.");
        }
        OutputFormat::Text => {
            output::info(&format!("{} jobs in {}", jobs.len(), jobs_dir.display()));
            for job in &jobs {
                let marker = if job.executable.exists() { " (built)" } else { "" };
                println!("{}{}", job.name, marker);
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let args = ListArgs {
            format: OutputFormat::Text,
        };

        let err = execute(args, &RunnerConfig::default(), &missing).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_list_empty_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ListArgs {
            format: OutputFormat::Json,
        };

        assert!(execute(args, &RunnerConfig::default(), dir.path()).unwrap());
    }
}

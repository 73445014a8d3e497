use crate::commands::{run_jobs, OutputFormat};
use crate::output;

use std::path::Path;

use clap::Args;
use color_eyre::Result;

use cbatch_service::{discover, validate_directory, RunnerConfig};

/// Compile and run every job in the directory
#[derive(Args, Debug)]
pub struct RunAllArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn execute(args: RunAllArgs, config: RunnerConfig, jobs_dir: &Path) -> Result<bool> {
    if let Err(e) = validate_directory(jobs_dir) {
        color_eyre::eyre::bail!("{}", e);
    }

    let jobs = discover(jobs_dir, &config.source_suffix);
    if jobs.is_empty() && args.format == OutputFormat::Text {
        output::warning("No jobs available to compile and run.");
        return Ok(true);
    }

    output::status("Jobs", &jobs_dir.display().to_string());
    run_jobs(config, jobs, args.format).await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::commands::fake_config;
    use std::fs;

    #[tokio::test]
    async fn test_run_all_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunAllArgs {
            format: OutputFormat::Text,
        };
        assert!(execute(args, fake_config(), dir.path()).await.unwrap());
    }

    #[tokio::test]
    async fn test_run_all_builds_every_job() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.c"), "#!/bin/sh\necho a\n").unwrap();
        fs::write(dir.path().join("b.c"), "#!/bin/sh\necho b\n").unwrap();

        let args = RunAllArgs {
            format: OutputFormat::Json,
        };
        assert!(execute(args, fake_config(), dir.path()).await.unwrap());
        assert!(dir.path().join("a").exists());
        assert!(dir.path().join("b").exists());
    }
}

use crate::commands::{run_jobs, OutputFormat};

use std::path::Path;

use clap::Args;
use color_eyre::Result;

use cbatch_service::{find_job, validate_directory, RunnerConfig, ServiceError};

/// Compile and run a single job
#[derive(Args, Debug)]
pub struct RunArgs {
    /// File name of the job, e.g. hello.c
    pub job: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn execute(args: RunArgs, config: RunnerConfig, jobs_dir: &Path) -> Result<bool> {
    if let Err(e) = validate_directory(jobs_dir) {
        color_eyre::eyre::bail!("{}", e);
    }

    let Some(job) = find_job(jobs_dir, &config.source_suffix, &args.job) else {
        let err = ServiceError::JobNotFound {
            name: args.job,
            directory: jobs_dir.to_path_buf(),
        };
        color_eyre::eyre::bail!("{}", err);
    };

    run_jobs(config, vec![job], args.format).await
}

pub mod list;
pub mod run;
pub mod run_all;

use clap::ValueEnum;
use color_eyre::Result;

use cbatch_service::{progress_channel, Job, JobReport, JobRunner, RunEvent, RunnerConfig};

use crate::output;

/// How command results are printed
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Coloured, human-readable lines
    #[default]
    Text,
    /// A JSON document on stdout
    Json,
}

/// Build and run `jobs`, printing progress or a JSON report.
/// Returns whether every job ran successfully.
pub async fn run_jobs(config: RunnerConfig, jobs: Vec<Job>, format: OutputFormat) -> Result<bool> {
    let reports = match format {
        OutputFormat::Json => {
            let reports = JobRunner::new(config).build_and_run_jobs(&jobs).await;
            println!("{}", serde_json::to_string_pretty(&reports)?);
            reports
        }
        OutputFormat::Text => {
            let (tx, mut rx) = progress_channel();
            let runner = JobRunner::new(config).with_progress(tx);

            let exec_handle = tokio::spawn(async move { runner.build_and_run_jobs(&jobs).await });

            while let Some(event) = rx.recv().await {
                print_event(&event);
            }

            exec_handle.await?
        }
    };

    Ok(all_succeeded(&reports))
}

pub fn all_succeeded(reports: &[JobReport]) -> bool {
    reports.iter().all(|report| report.outcome.is_success())
}

fn print_event(event: &RunEvent) {
    match event {
        RunEvent::BatchStarted { total_jobs, .. } if *total_jobs > 1 => {
            output::banner(&format!("Running {} jobs", total_jobs));
        }
        RunEvent::CompileStarted { job_name, .. } => output::status("Compiling", job_name),
        RunEvent::CompileFinished {
            job_name,
            success: true,
            ..
        } => output::status("Running", job_name),
        RunEvent::ProgramOutput { line, is_error, .. } => {
            if *is_error {
                output::diagnostic(line);
            } else {
                output::program_stdout(line);
            }
        }
        RunEvent::JobCompleted {
            job_name,
            outcome,
            duration,
            ..
        } => {
            let heading = format!("{}: {} ({:.2}s)", job_name, outcome, duration.as_secs_f64());
            if outcome.is_success() {
                output::success(&heading);
            } else {
                output::failure(&heading);
            }
            // Program output was already streamed line by line
            if outcome.has_unstreamed_detail() {
                outcome.detail().lines().for_each(output::diagnostic);
            }
        }
        RunEvent::BatchCompleted {
            succeeded,
            failed,
            duration,
        } => {
            eprintln!();
            let summary = format!(
                "{} succeeded, {} failed in {:.2}s",
                succeeded,
                failed,
                duration.as_secs_f64()
            );
            if *failed == 0 {
                output::success(&summary);
            } else {
                output::failure(&summary);
            }
        }
        _ => {}
    }
}

/// Config whose "compiler" copies a shell-script source to the executable
/// path: `sh -c SCRIPT fake-cc <source> -o <exe>`
#[cfg(test)]
pub(crate) fn fake_config() -> RunnerConfig {
    const COPY_SOURCE: &str = r#"cp "$1" "$3" && chmod +x "$3""#;
    RunnerConfig::default()
        .with_compiler("sh")
        .with_compiler_args(["-c", COPY_SOURCE, "fake-cc"])
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use cbatch_service::BuildOutcome;
    use std::fs;
    use std::time::Duration;

    #[test]
    fn test_all_succeeded() {
        let job = Job::new(std::path::Path::new("jobs"), "a.c", ".c").unwrap();
        let ok = JobReport {
            job: job.clone(),
            outcome: BuildOutcome::RunSucceeded {
                stdout: String::new(),
            },
            duration: Duration::ZERO,
        };
        let failed = JobReport {
            job,
            outcome: BuildOutcome::CompileFailed {
                diagnostics: "error".to_string(),
            },
            duration: Duration::ZERO,
        };

        assert!(all_succeeded(&[]));
        assert!(all_succeeded(&[ok.clone()]));
        assert!(!all_succeeded(&[ok, failed]));
    }

    #[tokio::test]
    async fn test_run_jobs_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.c"), "#!/bin/sh\necho ok\n").unwrap();
        fs::write(dir.path().join("bad.c"), "#!/bin/sh\nexit 2\n").unwrap();

        let jobs = cbatch_service::discover(dir.path(), ".c");
        assert_eq!(jobs.len(), 2);

        let all_ok = run_jobs(fake_config(), jobs, OutputFormat::Text)
            .await
            .unwrap();
        assert!(!all_ok);
    }

    #[tokio::test]
    async fn test_run_jobs_json_success() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.c"), "#!/bin/sh\necho ok\n").unwrap();

        let jobs = cbatch_service::discover(dir.path(), ".c");
        let all_ok = run_jobs(fake_config(), jobs, OutputFormat::Json)
            .await
            .unwrap();
        assert!(all_ok);
    }
}

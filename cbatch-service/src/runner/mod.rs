// Job Runner
// Compiles jobs with the configured compiler and runs the resulting executables

pub mod process;

// Re-export key types
pub use process::{OutputCallback, ProcessOutput, ProcessRunner};

use crate::config::RunnerConfig;
use crate::events::{ProgressSender, RunEvent};
use crate::job::{self, Job};
use crate::outcome::{BuildOutcome, BuildStatus, JobReport, RunFailure};

use std::ffi::OsString;
use std::path::Path;
use std::time::Instant;

/// Builds and runs jobs one at a time.
///
/// Standalone calls to [`build`](Self::build), [`run`](Self::run) and
/// [`build_and_run`](Self::build_and_run) report progress with job index 0;
/// batch calls use the position of the job in the batch.
pub struct JobRunner {
    config: RunnerConfig,
    process: ProcessRunner,
    progress: Option<ProgressSender>,
}

impl JobRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            process: ProcessRunner::new(),
            progress: None,
        }
    }

    /// Report progress events on `sender`
    pub fn with_progress(mut self, sender: ProgressSender) -> Self {
        self.progress = Some(sender);
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// List jobs in `directory` using the configured source suffix
    pub fn discover(&self, directory: &Path) -> Vec<Job> {
        job::discover(directory, &self.config.source_suffix)
    }

    /// Compile `job`: `<compiler> [args...] <source> -o <executable>`
    pub async fn build(&self, job: &Job) -> BuildStatus {
        self.build_indexed(0, job).await
    }

    /// Run the compiled executable of `job` with no arguments
    pub async fn run(&self, job: &Job) -> BuildOutcome {
        self.run_indexed(0, job).await
    }

    /// Build `job`, then run it only if the build succeeded
    pub async fn build_and_run(&self, job: &Job) -> BuildOutcome {
        self.build_and_run_indexed(0, job).await
    }

    /// Discover jobs in `directory` and build and run each in order
    pub async fn build_and_run_all(&self, directory: &Path) -> Vec<JobReport> {
        let jobs = self.discover(directory);
        self.run_batch(Some(directory), &jobs).await
    }

    /// Build and run an explicit list of jobs in order
    pub async fn build_and_run_jobs(&self, jobs: &[Job]) -> Vec<JobReport> {
        self.run_batch(None, jobs).await
    }

    async fn run_batch(&self, directory: Option<&Path>, jobs: &[Job]) -> Vec<JobReport> {
        let started = Instant::now();
        self.emit(RunEvent::BatchStarted {
            directory: directory.map(Path::to_path_buf),
            total_jobs: jobs.len(),
        });

        let mut reports = Vec::with_capacity(jobs.len());
        for (index, job) in jobs.iter().enumerate() {
            let job_started = Instant::now();
            self.emit(RunEvent::JobStarted {
                index,
                job: job.clone(),
            });

            let outcome = self.build_and_run_indexed(index, job).await;
            let duration = job_started.elapsed();
            tracing::info!(job = %job.name, outcome = %outcome, elapsed_ms = duration.as_millis() as u64, "job finished");

            self.emit(RunEvent::JobCompleted {
                index,
                job_name: job.name.clone(),
                outcome: outcome.clone(),
                duration,
            });
            reports.push(JobReport {
                job: job.clone(),
                outcome,
                duration,
            });
        }

        let succeeded = reports.iter().filter(|r| r.outcome.is_success()).count();
        self.emit(RunEvent::BatchCompleted {
            succeeded,
            failed: reports.len() - succeeded,
            duration: started.elapsed(),
        });
        reports
    }

    async fn build_and_run_indexed(&self, index: usize, job: &Job) -> BuildOutcome {
        match self.build_indexed(index, job).await.into_failure() {
            Some(failure) => failure,
            None => self.run_indexed(index, job).await,
        }
    }

    async fn build_indexed(&self, index: usize, job: &Job) -> BuildStatus {
        let mut args: Vec<OsString> = self.config.compiler_args.iter().map(OsString::from).collect();
        args.push(job.source.clone().into_os_string());
        args.push(OsString::from("-o"));
        args.push(job.executable.clone().into_os_string());

        tracing::debug!(job = %job.name, compiler = %self.config.compiler, "compiling");
        self.emit(RunEvent::CompileStarted {
            index,
            job_name: job.name.clone(),
        });

        let output = self.process.run(&self.config.compiler, &args).await;
        let success = output.success();

        self.emit(RunEvent::CompileFinished {
            index,
            job_name: job.name.clone(),
            success,
        });

        if success {
            BuildStatus::Succeeded
        } else {
            tracing::info!(job = %job.name, exit_code = ?output.exit_code, "compilation failed");
            BuildStatus::Failed {
                diagnostics: output.stderr,
            }
        }
    }

    async fn run_indexed(&self, index: usize, job: &Job) -> BuildOutcome {
        if !job.executable.exists() {
            tracing::warn!(job = %job.name, executable = %job.executable.display(), "executable missing after build");
            return BuildOutcome::RunFailed(RunFailure::MissingExecutable);
        }

        let program = job.command_path();
        let no_args: [&str; 0] = [];
        let output = match &self.progress {
            Some(sender) => {
                let sender = sender.clone();
                let job_name = job.name.clone();
                let on_output: OutputCallback = Box::new(move |line, is_error| {
                    let _ = sender.send(RunEvent::ProgramOutput {
                        index,
                        job_name: job_name.clone(),
                        line: line.to_string(),
                        is_error,
                    });
                });
                self.process.run_streaming(&program, no_args, on_output).await
            }
            None => self.process.run(&program, no_args).await,
        };

        if output.success() {
            BuildOutcome::RunSucceeded {
                stdout: output.stdout,
            }
        } else {
            BuildOutcome::RunFailed(RunFailure::Failed {
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            })
        }
    }

    fn emit(&self, event: RunEvent) {
        if let Some(sender) = &self.progress {
            // A closed receiver must not affect execution
            let _ = sender.send(event);
        }
    }
}

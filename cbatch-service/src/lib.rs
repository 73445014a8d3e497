// cbatch Service Library
// Job discovery, compilation and execution for directories of C sources

pub mod config;
pub mod error;
pub mod events;
pub mod job;
pub mod outcome;
pub mod runner;

// Re-export commonly used types
pub use config::{ConfigError, RunnerConfig};
pub use error::{ServiceError, ServiceResult};
pub use events::{progress_channel, ProgressReceiver, ProgressSender, RunEvent};
pub use job::{
    discover, find_job, resolve_directory, validate_directory, DirectoryChoice, Job,
};
pub use outcome::{BuildOutcome, BuildStatus, JobReport, RunFailure};
pub use runner::{JobRunner, ProcessOutput, ProcessRunner};

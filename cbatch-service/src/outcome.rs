// Job Outcomes
// Results of building and running a job

use crate::job::Job;

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Status of a job whose executable was never produced
pub const EXECUTION_ERROR: &str = "Execution error";

const MISSING_EXECUTABLE_DETAIL: &str = "Error during execution: executable not found";

/// Intermediate result of the compile step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Succeeded,
    Failed { diagnostics: String },
}

impl BuildStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Succeeded)
    }

    /// The final outcome for a failed build, `None` when the build succeeded
    pub fn into_failure(self) -> Option<BuildOutcome> {
        match self {
            BuildStatus::Succeeded => None,
            BuildStatus::Failed { diagnostics } => Some(BuildOutcome::CompileFailed { diagnostics }),
        }
    }
}

/// Result of attempting to build and optionally run a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildOutcome {
    /// Compiler exited non-zero; carries its error stream verbatim
    CompileFailed { diagnostics: String },
    /// Program exited 0; carries its standard output verbatim
    RunSucceeded { stdout: String },
    /// Program failed or could not be run
    RunFailed(RunFailure),
}

/// Why a compiled job did not run successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "failure", rename_all = "snake_case")]
pub enum RunFailure {
    /// The program exited non-zero, was killed by a signal (no exit code),
    /// or could not be spawned
    Failed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The compiler reported success but no executable exists
    MissingExecutable,
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::RunSucceeded { .. })
    }

    /// Short status used in headings, e.g. `hello.c: Success`
    pub fn label(&self) -> &'static str {
        match self {
            BuildOutcome::CompileFailed { .. } => "Compilation failed",
            BuildOutcome::RunSucceeded { .. } => "Success",
            BuildOutcome::RunFailed(RunFailure::Failed { .. }) => "Execution failed",
            BuildOutcome::RunFailed(RunFailure::MissingExecutable) => EXECUTION_ERROR,
        }
    }

    /// Text block to show under the heading
    pub fn detail(&self) -> &str {
        match self {
            BuildOutcome::CompileFailed { diagnostics } => diagnostics,
            BuildOutcome::RunSucceeded { stdout } => stdout,
            BuildOutcome::RunFailed(RunFailure::Failed { stdout, stderr, .. }) => {
                if stderr.is_empty() {
                    stdout
                } else {
                    stderr
                }
            }
            BuildOutcome::RunFailed(RunFailure::MissingExecutable) => MISSING_EXECUTABLE_DETAIL,
        }
    }

    /// Whether [`detail`](Self::detail) holds text that was never streamed
    /// as program output
    pub fn has_unstreamed_detail(&self) -> bool {
        matches!(
            self,
            BuildOutcome::CompileFailed { .. }
                | BuildOutcome::RunFailed(RunFailure::MissingExecutable)
        )
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildOutcome::RunFailed(RunFailure::Failed {
                exit_code: Some(code),
                ..
            }) => write!(f, "{} (exit code {})", self.label(), code),
            BuildOutcome::RunFailed(RunFailure::Failed {
                exit_code: None, ..
            }) => write!(f, "{} (no exit code)", self.label()),
            _ => f.write_str(self.label()),
        }
    }
}

/// A job together with its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub job: Job,
    pub outcome: BuildOutcome,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn failed(code: Option<i32>, stdout: &str, stderr: &str) -> BuildOutcome {
        BuildOutcome::RunFailed(RunFailure::Failed {
            exit_code: code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        })
    }

    #[test]
    fn test_build_status_into_failure() {
        assert_eq!(BuildStatus::Succeeded.into_failure(), None);
        assert_eq!(
            BuildStatus::Failed {
                diagnostics: "oops".into()
            }
            .into_failure(),
            Some(BuildOutcome::CompileFailed {
                diagnostics: "oops".into()
            })
        );
    }

    #[test]
    fn test_labels_and_details() {
        let ok = BuildOutcome::RunSucceeded {
            stdout: "Hello\n".into(),
        };
        assert!(ok.is_success());
        assert_eq!(ok.label(), "Success");
        assert_eq!(ok.detail(), "Hello\n");

        let missing = BuildOutcome::RunFailed(RunFailure::MissingExecutable);
        assert!(!missing.is_success());
        assert_eq!(missing.label(), EXECUTION_ERROR);
        assert_eq!(missing.detail(), "Error during execution: executable not found");
        assert!(missing.has_unstreamed_detail());
        assert!(!ok.has_unstreamed_detail());
        assert_eq!(missing.to_string(), "Execution error");
    }

    #[test]
    fn test_failed_detail_prefers_stderr() {
        assert_eq!(failed(Some(1), "out", "err").detail(), "err");
        assert_eq!(failed(Some(1), "out", "").detail(), "out");
        assert_eq!(
            failed(Some(3), "", "").to_string(),
            "Execution failed (exit code 3)"
        );
        assert_eq!(failed(None, "", "").to_string(), "Execution failed (no exit code)");
    }

    #[test]
    fn test_report_json_shape() {
        let report = JobReport {
            job: Job::new(Path::new("jobs"), "hello.c", ".c").unwrap(),
            outcome: BuildOutcome::RunFailed(RunFailure::MissingExecutable),
            duration: Duration::from_millis(42),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["job"]["name"], "hello.c");
        assert_eq!(value["outcome"]["status"], "run_failed");
        assert_eq!(value["outcome"]["failure"], "missing_executable");
        assert_eq!(value["duration_ms"], 42);
    }
}

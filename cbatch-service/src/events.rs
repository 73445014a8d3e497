// Run Events
// Progress reporting for job builds and runs

use crate::job::Job;
use crate::outcome::BuildOutcome;

use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

/// Sender for run progress events
pub type ProgressSender = mpsc::UnboundedSender<RunEvent>;

/// Receiver for run progress events
pub type ProgressReceiver = mpsc::UnboundedReceiver<RunEvent>;

/// Create a new progress channel
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// Events emitted while building and running jobs
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A batch of jobs is about to run
    BatchStarted {
        directory: Option<PathBuf>,
        total_jobs: usize,
    },

    /// Job processing started
    JobStarted { index: usize, job: Job },

    /// Compiler spawned for the job
    CompileStarted { index: usize, job_name: String },

    /// Compiler exited
    CompileFinished {
        index: usize,
        job_name: String,
        success: bool,
    },

    /// A line written by the compiled program
    ProgramOutput {
        index: usize,
        job_name: String,
        line: String,
        is_error: bool,
    },

    /// Job processing finished
    JobCompleted {
        index: usize,
        job_name: String,
        outcome: BuildOutcome,
        duration: Duration,
    },

    /// Every job in the batch has been processed
    BatchCompleted {
        succeeded: usize,
        failed: usize,
        duration: Duration,
    },
}

impl RunEvent {
    /// Index of the job this event belongs to, if any
    pub fn job_index(&self) -> Option<usize> {
        match self {
            RunEvent::JobStarted { index, .. }
            | RunEvent::CompileStarted { index, .. }
            | RunEvent::CompileFinished { index, .. }
            | RunEvent::ProgramOutput { index, .. }
            | RunEvent::JobCompleted { index, .. } => Some(*index),
            RunEvent::BatchStarted { .. } | RunEvent::BatchCompleted { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunEvent::BatchCompleted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_index() {
        let event = RunEvent::CompileStarted {
            index: 3,
            job_name: "a.c".into(),
        };
        assert_eq!(event.job_index(), Some(3));
        assert!(!event.is_terminal());

        let done = RunEvent::BatchCompleted {
            succeeded: 1,
            failed: 0,
            duration: Duration::ZERO,
        };
        assert_eq!(done.job_index(), None);
        assert!(done.is_terminal());
    }

    #[tokio::test]
    async fn test_progress_channel_delivers_in_order() {
        let (tx, mut rx) = progress_channel();
        tx.send(RunEvent::BatchStarted {
            directory: None,
            total_jobs: 0,
        })
        .unwrap();
        tx.send(RunEvent::BatchCompleted {
            succeeded: 0,
            failed: 0,
            duration: Duration::ZERO,
        })
        .unwrap();
        drop(tx);

        assert!(matches!(rx.recv().await, Some(RunEvent::BatchStarted { .. })));
        assert!(matches!(rx.recv().await, Some(RunEvent::BatchCompleted { .. })));
        assert!(rx.recv().await.is_none());
    }
}

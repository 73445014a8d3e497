use crate::events::EventHandler;
use crate::ui;

use color_eyre::Result;
use ratatui::DefaultTerminal;

use std::path::{Path, PathBuf};
use std::time::Duration;

use cbatch_service::{
    progress_channel, resolve_directory, BuildOutcome, Job, JobRunner, ProgressReceiver,
    RunEvent, RunnerConfig,
};

// =============================================================================
// Application States
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Browse jobs in the current directory
    JobList,
    /// Edit the jobs directory path
    DirectoryInput,
    /// Display running jobs with real-time progress
    Executing,
    /// Scrollable log viewer for execution output
    OutputLog,
    /// Static help text
    Help,
}

/// What the user asked to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    One,
    All,
}

/// Entries of the mode selector, in display order
pub const MODES: [&str; 4] = ["List Jobs", "Run Job", "Run All Jobs", "Help"];

// =============================================================================
// Application
// =============================================================================

pub struct App {
    pub state: AppState,
    pub previous_states: Vec<AppState>,
    pub should_quit: bool,

    pub config: RunnerConfig,
    pub jobs_dir: PathBuf,
    pub jobs: Vec<Job>,
    pub selected_index: usize,
    pub directory_error: Option<String>,

    // Directory input state
    pub directory_input: DirectoryInputState,

    // Execution state
    pub execution_state: Option<ExecutionState>,
    pub event_receiver: Option<ProgressReceiver>,
    pub pending_execution: Option<RunMode>,

    // Log viewer state
    pub log_viewer: LogViewerState,
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryInputState {
    pub buffer: String,
}

// =============================================================================
// Execution State
// =============================================================================

#[derive(Debug)]
pub struct ExecutionState {
    pub mode: RunMode,
    pub title: String,
    pub jobs: Vec<JobProgress>,
    pub output_lines: Vec<OutputLine>,
    pub is_complete: bool,
    pub succeeded: usize,
    pub failed: usize,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct JobProgress {
    pub name: String,
    pub status: JobStatus,
    pub duration: Option<Duration>,
    /// Output line holding this job's `<job>: <status>` heading
    pub heading: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Compiling,
    Running,
    Succeeded,
    CompileFailed,
    RunFailed,
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::CompileFailed | JobStatus::RunFailed
        )
    }
}

#[derive(Debug, Clone)]
pub struct OutputLine {
    pub text: String,
    pub kind: OutputKind,
    pub job_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    Info,
    Output,
    Error,
    Success,
    Failure,
    Warning,
    JobHeader,
}

// =============================================================================
// Log Viewer State
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct LogViewerState {
    pub scroll_offset: usize,
    pub search_query: String,
    pub search_active: bool,
    pub search_matches: Vec<usize>,
    pub current_match: usize,
    pub filter_job: Option<String>,
}

impl LogViewerState {
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.search_query.clear();
        self.search_active = false;
        self.search_matches.clear();
        self.current_match = 0;
        self.filter_job = None;
    }
}

// =============================================================================
// App Implementation
// =============================================================================

impl App {
    /// Create the app on `requested_dir`, falling back to the configured
    /// default directory when it is not a valid directory.
    pub fn new(config: RunnerConfig, requested_dir: &Path) -> Self {
        let mut app = Self {
            state: AppState::JobList,
            previous_states: Vec::new(),
            should_quit: false,
            jobs_dir: config.jobs_dir.clone(),
            config,
            jobs: Vec::new(),
            selected_index: 0,
            directory_error: None,
            directory_input: DirectoryInputState::default(),
            execution_state: None,
            event_receiver: None,
            pending_execution: None,
            log_viewer: LogViewerState::default(),
        };
        app.set_directory(requested_dir);
        app
    }

    pub async fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;
            self.handle_events()?;

            // Handle pending execution
            if let Some(mode) = self.pending_execution.take() {
                self.start_execution(mode);
            }

            // Process run events
            self.process_run_events();
        }
        Ok(())
    }

    // =========================================================================
    // Job Discovery
    // =========================================================================

    /// Switch to `requested`, or to the default directory if it is invalid
    pub fn set_directory(&mut self, requested: &Path) {
        let choice = resolve_directory(requested, &self.config.jobs_dir);
        self.directory_error = choice.rejected.as_ref().map(|e| {
            format!("{}. Falling back to default.", e)
        });
        self.jobs_dir = choice.directory;
        self.refresh_jobs();
    }

    pub fn refresh_jobs(&mut self) {
        self.jobs = cbatch_service::discover(&self.jobs_dir, &self.config.source_suffix);
        if self.selected_index >= self.jobs.len() {
            self.selected_index = self.jobs.len().saturating_sub(1);
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn move_up(&mut self) {
        match self.state {
            AppState::JobList => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }
            AppState::OutputLog => {
                if self.log_viewer.scroll_offset > 0 {
                    self.log_viewer.scroll_offset -= 1;
                }
            }
            _ => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.state {
            AppState::JobList => {
                if self.selected_index < self.jobs.len().saturating_sub(1) {
                    self.selected_index += 1;
                }
            }
            AppState::OutputLog => {
                if self.log_viewer.scroll_offset < self.max_scroll() {
                    self.log_viewer.scroll_offset += 1;
                }
            }
            _ => {}
        }
    }

    pub fn page_up(&mut self) {
        match self.state {
            AppState::OutputLog => {
                self.log_viewer.scroll_offset = self.log_viewer.scroll_offset.saturating_sub(20);
            }
            _ => {
                for _ in 0..10 {
                    self.move_up();
                }
            }
        }
    }

    pub fn page_down(&mut self) {
        match self.state {
            AppState::OutputLog => {
                self.log_viewer.scroll_offset =
                    (self.log_viewer.scroll_offset + 20).min(self.max_scroll());
            }
            _ => {
                for _ in 0..10 {
                    self.move_down();
                }
            }
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.log_viewer.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.log_viewer.scroll_offset = self.max_scroll();
    }

    fn max_scroll(&self) -> usize {
        self.filtered_output_lines().len().saturating_sub(1)
    }

    pub fn push_state(&mut self, new_state: AppState) {
        let old = self.state.clone();
        self.previous_states.push(old);
        self.state = new_state;
    }

    pub fn go_back(&mut self) {
        if let Some(prev) = self.previous_states.pop() {
            self.state = prev;
        } else {
            self.should_quit = true;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn open_help(&mut self) {
        if self.state != AppState::Help {
            self.push_state(AppState::Help);
        }
    }

    /// Index into [`MODES`] for the current view
    pub fn mode_index(&self) -> usize {
        match self.state {
            AppState::JobList | AppState::DirectoryInput => 0,
            AppState::Executing | AppState::OutputLog => match self.execution_mode() {
                Some(RunMode::All) => 2,
                _ => 1,
            },
            AppState::Help => 3,
        }
    }

    fn execution_mode(&self) -> Option<RunMode> {
        self.execution_state.as_ref().map(|exec| exec.mode)
    }

    // =========================================================================
    // Directory Input
    // =========================================================================

    pub fn open_directory_input(&mut self) {
        self.directory_input.buffer = self.jobs_dir.display().to_string();
        self.push_state(AppState::DirectoryInput);
    }

    pub fn directory_input_push(&mut self, c: char) {
        self.directory_input.buffer.push(c);
    }

    pub fn directory_input_pop(&mut self) {
        self.directory_input.buffer.pop();
    }

    pub fn confirm_directory_input(&mut self) {
        let requested = PathBuf::from(self.directory_input.buffer.trim());
        self.directory_input.buffer.clear();
        self.selected_index = 0;
        self.set_directory(&requested);
        self.go_back();
    }

    pub fn cancel_directory_input(&mut self) {
        self.directory_input.buffer.clear();
        self.go_back();
    }

    // =========================================================================
    // Execution
    // =========================================================================

    pub fn is_executing(&self) -> bool {
        self.execution_state
            .as_ref()
            .is_some_and(|exec| !exec.is_complete)
    }

    pub fn request_execution(&mut self, mode: RunMode) {
        if self.is_executing() {
            return;
        }
        if mode == RunMode::One && self.jobs.is_empty() {
            return;
        }
        self.pending_execution = Some(mode);
    }

    /// Initialise execution state for `jobs` and switch to the execution view
    pub fn begin_execution(&mut self, mode: RunMode, jobs: &[Job]) {
        let title = match mode {
            RunMode::One => jobs
                .first()
                .map(|job| format!("Compile and Run: {}", job.name))
                .unwrap_or_else(|| "Compile and Run".to_string()),
            RunMode::All => format!("Compile and Run All: {}", self.jobs_dir.display()),
        };

        self.execution_state = Some(ExecutionState {
            mode,
            title,
            jobs: jobs
                .iter()
                .map(|job| JobProgress {
                    name: job.name.clone(),
                    status: JobStatus::Pending,
                    duration: None,
                    heading: None,
                })
                .collect(),
            output_lines: Vec::new(),
            is_complete: false,
            succeeded: 0,
            failed: 0,
            duration: None,
        });

        if self.state != AppState::Executing {
            self.push_state(AppState::Executing);
        }
    }

    fn start_execution(&mut self, mode: RunMode) {
        let jobs = match mode {
            RunMode::One => match self.selected_job() {
                Some(job) => vec![job.clone()],
                None => return,
            },
            RunMode::All => {
                self.refresh_jobs();
                self.jobs.clone()
            }
        };

        self.begin_execution(mode, &jobs);

        tracing::info!(?mode, jobs = jobs.len(), directory = %self.jobs_dir.display(), "starting execution");

        let (tx, rx) = progress_channel();
        self.event_receiver = Some(rx);

        let runner = JobRunner::new(self.config.clone()).with_progress(tx);
        let directory = self.jobs_dir.clone();
        tokio::spawn(async move {
            match mode {
                RunMode::One => runner.build_and_run_jobs(&jobs).await,
                RunMode::All => runner.build_and_run_all(&directory).await,
            };
        });
    }

    pub fn process_run_events(&mut self) {
        let Some(rx) = &mut self.event_receiver else {
            return;
        };

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        let mut should_close = false;
        for event in events {
            should_close |= event.is_terminal();
            self.apply_event(event);
        }

        if should_close {
            self.event_receiver = None;
        }
    }

    pub fn apply_event(&mut self, event: RunEvent) {
        let Some(exec) = &mut self.execution_state else {
            return;
        };

        match event {
            RunEvent::BatchStarted { total_jobs, .. } => {
                if total_jobs == 0 {
                    exec.push_line(
                        "No jobs available to compile and run.",
                        OutputKind::Warning,
                        None,
                    );
                }
            }

            RunEvent::JobStarted { index, job } => {
                // A run-all batch may rediscover a different set than the one shown
                if index >= exec.jobs.len() || exec.jobs[index].name != job.name {
                    exec.jobs.truncate(index);
                    exec.jobs.push(JobProgress {
                        name: job.name.clone(),
                        status: JobStatus::Pending,
                        duration: None,
                        heading: None,
                    });
                }
                // The heading leads the job's block and gets its final status on completion
                let heading = exec.output_lines.len();
                exec.push_line(format!("{}: In progress", job.name), OutputKind::JobHeader, Some(&job.name));
                if let Some(progress) = exec.jobs.get_mut(index) {
                    progress.heading = Some(heading);
                }
            }

            RunEvent::CompileStarted { index, job_name } => {
                exec.set_status(index, JobStatus::Compiling);
                exec.push_line(format!("Compiling {}", job_name), OutputKind::Info, Some(&job_name));
            }

            RunEvent::CompileFinished {
                index,
                job_name,
                success,
            } => {
                if success {
                    exec.set_status(index, JobStatus::Running);
                    exec.push_line("Compilation Successful", OutputKind::Success, Some(&job_name));
                } else {
                    exec.set_status(index, JobStatus::CompileFailed);
                }
            }

            RunEvent::ProgramOutput {
                job_name,
                line,
                is_error,
                ..
            } => {
                let kind = if is_error {
                    OutputKind::Error
                } else {
                    OutputKind::Output
                };
                exec.push_line(line, kind, Some(&job_name));
            }

            RunEvent::JobCompleted {
                index,
                job_name,
                outcome,
                duration,
            } => {
                let status = match &outcome {
                    BuildOutcome::RunSucceeded { .. } => JobStatus::Succeeded,
                    BuildOutcome::CompileFailed { .. } => JobStatus::CompileFailed,
                    BuildOutcome::RunFailed(_) => JobStatus::RunFailed,
                };
                exec.set_status(index, status);
                let heading = exec.jobs.get_mut(index).and_then(|job| {
                    job.duration = Some(duration);
                    job.heading
                });

                // Program output was streamed already; only add what was not
                if outcome.has_unstreamed_detail() {
                    for line in outcome.detail().lines() {
                        exec.push_line(line, OutputKind::Error, Some(&job_name));
                    }
                }

                let kind = if outcome.is_success() {
                    OutputKind::Success
                } else {
                    OutputKind::Failure
                };
                let text = format!("{}: {}", job_name, outcome);
                match heading.and_then(|i| exec.output_lines.get_mut(i)) {
                    Some(line) => {
                        line.text = text;
                        line.kind = kind;
                    }
                    None => exec.push_line(text, kind, Some(&job_name)),
                }
                exec.push_line("", OutputKind::Output, Some(&job_name));
            }

            RunEvent::BatchCompleted {
                succeeded,
                failed,
                duration,
            } => {
                exec.succeeded = succeeded;
                exec.failed = failed;
                exec.duration = Some(duration);
                exec.is_complete = true;
                if succeeded + failed > 0 {
                    exec.push_line(
                        format!("{} succeeded, {} failed", succeeded, failed),
                        if failed == 0 {
                            OutputKind::Success
                        } else {
                            OutputKind::Failure
                        },
                        None,
                    );
                }
            }
        }
    }

    // =========================================================================
    // Log Viewer
    // =========================================================================

    pub fn open_log_viewer(&mut self) {
        if self.execution_state.is_some() {
            self.log_viewer.reset();
            self.push_state(AppState::OutputLog);
        }
    }

    pub fn start_search(&mut self) {
        if self.state == AppState::OutputLog {
            self.log_viewer.search_active = true;
            self.log_viewer.search_query.clear();
            self.log_viewer.search_matches.clear();
            self.log_viewer.current_match = 0;
        }
    }

    pub fn search_push_char(&mut self, c: char) {
        if self.log_viewer.search_active {
            self.log_viewer.search_query.push(c);
            self.update_search_matches();
        }
    }

    pub fn search_pop_char(&mut self) {
        if self.log_viewer.search_active {
            self.log_viewer.search_query.pop();
            self.update_search_matches();
        }
    }

    pub fn confirm_search(&mut self) {
        self.log_viewer.search_active = false;
        if !self.log_viewer.search_matches.is_empty() {
            self.log_viewer.scroll_offset =
                self.log_viewer.search_matches[self.log_viewer.current_match];
        }
    }

    pub fn cancel_search(&mut self) {
        self.log_viewer.search_active = false;
        self.log_viewer.search_query.clear();
        self.log_viewer.search_matches.clear();
    }

    pub fn next_search_match(&mut self) {
        if !self.log_viewer.search_matches.is_empty() {
            self.log_viewer.current_match =
                (self.log_viewer.current_match + 1) % self.log_viewer.search_matches.len();
            self.log_viewer.scroll_offset =
                self.log_viewer.search_matches[self.log_viewer.current_match];
        }
    }

    fn update_search_matches(&mut self) {
        let query = self.log_viewer.search_query.to_lowercase();
        let matches = if query.is_empty() {
            Vec::new()
        } else {
            self.filtered_output_lines()
                .iter()
                .enumerate()
                .filter(|(_, line)| line.text.to_lowercase().contains(&query))
                .map(|(i, _)| i)
                .collect()
        };
        self.log_viewer.search_matches = matches;
        self.log_viewer.current_match = 0;
    }

    /// Cycle the log filter: all jobs, then each job in turn
    pub fn cycle_job_filter(&mut self) {
        let Some(exec) = &self.execution_state else {
            return;
        };
        let next = match &self.log_viewer.filter_job {
            None => exec.jobs.first(),
            Some(current) => exec
                .jobs
                .iter()
                .skip_while(|job| &job.name != current)
                .nth(1),
        };
        self.log_viewer.filter_job = next.map(|job| job.name.clone());
        self.log_viewer.scroll_offset = 0;
        self.update_search_matches();
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Get the currently selected job, if any
    pub fn selected_job(&self) -> Option<&Job> {
        self.jobs.get(self.selected_index)
    }

    /// Output lines for the log viewer, restricted to the filtered job
    pub fn filtered_output_lines(&self) -> Vec<&OutputLine> {
        let Some(exec) = &self.execution_state else {
            return Vec::new();
        };
        exec.output_lines
            .iter()
            .filter(|line| match (&self.log_viewer.filter_job, &line.job_name) {
                (Some(filter), Some(job)) => job == filter,
                (Some(_), None) => false,
                (None, _) => true,
            })
            .collect()
    }

    /// Ratio of finished jobs (0.0 to 1.0)
    pub fn execution_progress(&self) -> f64 {
        match &self.execution_state {
            Some(exec) if exec.is_complete => 1.0,
            Some(exec) if !exec.jobs.is_empty() => {
                let done = exec.jobs.iter().filter(|j| j.status.is_finished()).count();
                done as f64 / exec.jobs.len() as f64
            }
            _ => 0.0,
        }
    }
}

impl ExecutionState {
    fn set_status(&mut self, index: usize, status: JobStatus) {
        if let Some(job) = self.jobs.get_mut(index) {
            job.status = status;
        }
    }

    fn push_line(&mut self, text: impl Into<String>, kind: OutputKind, job_name: Option<&str>) {
        self.output_lines.push(OutputLine {
            text: text.into(),
            kind,
            job_name: job_name.map(str::to_string),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn app_with_jobs(names: &[&str]) -> (tempfile::TempDir, App) {
        let temp = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(temp.path().join(name), "").unwrap();
        }
        let config = RunnerConfig::default().with_jobs_dir(temp.path());
        let app = App::new(config, temp.path());
        (temp, app)
    }

    fn job(name: &str) -> Job {
        Job::new(Path::new("jobs"), name, ".c").unwrap()
    }

    #[test]
    fn test_new_discovers_jobs() {
        let (_temp, app) = app_with_jobs(&["b.c", "a.c", "notes.txt"]);
        let names: Vec<_> = app.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["a.c", "b.c"]);
        assert!(app.directory_error.is_none());
        assert_eq!(app.state, AppState::JobList);
    }

    #[test]
    fn test_invalid_directory_falls_back_to_default() {
        let (temp, mut app) = app_with_jobs(&["a.c"]);

        app.open_directory_input();
        assert_eq!(app.state, AppState::DirectoryInput);
        app.directory_input.buffer = temp.path().join("typo").display().to_string();
        app.confirm_directory_input();

        assert_eq!(app.state, AppState::JobList);
        assert_eq!(app.jobs_dir, temp.path());
        assert_eq!(app.jobs.len(), 1);
        let message = app.directory_error.as_deref().unwrap();
        assert!(message.ends_with("Falling back to default."));
    }

    #[test]
    fn test_valid_directory_switches() {
        let (temp, mut app) = app_with_jobs(&["a.c"]);
        let other = temp.path().join("other");
        fs::create_dir(&other).unwrap();
        fs::write(other.join("x.c"), "").unwrap();
        fs::write(other.join("y.c"), "").unwrap();

        app.open_directory_input();
        app.directory_input.buffer.clear();
        for c in other.display().to_string().chars() {
            app.directory_input_push(c);
        }
        app.confirm_directory_input();

        assert_eq!(app.jobs_dir, other);
        assert_eq!(app.jobs.len(), 2);
        assert!(app.directory_error.is_none());
    }

    #[test]
    fn test_cancel_directory_input_keeps_directory() {
        let (temp, mut app) = app_with_jobs(&["a.c"]);
        app.open_directory_input();
        app.directory_input_pop();
        app.cancel_directory_input();

        assert_eq!(app.state, AppState::JobList);
        assert_eq!(app.jobs_dir, temp.path());
    }

    #[test]
    fn test_navigation_is_bounded() {
        let (_temp, mut app) = app_with_jobs(&["a.c", "b.c"]);
        app.move_up();
        assert_eq!(app.selected_index, 0);
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.selected_job().unwrap().name, "b.c");
    }

    #[test]
    fn test_run_one_requires_a_job() {
        let (_temp, mut app) = app_with_jobs(&[]);
        app.request_execution(RunMode::One);
        assert!(app.pending_execution.is_none());

        app.request_execution(RunMode::All);
        assert_eq!(app.pending_execution, Some(RunMode::All));
    }

    #[test]
    fn test_events_update_progress_and_output() {
        let (_temp, mut app) = app_with_jobs(&[]);
        let jobs = vec![job("broken.c"), job("hello.c")];
        app.begin_execution(RunMode::All, &jobs);
        assert_eq!(app.state, AppState::Executing);
        assert_eq!(app.mode_index(), 2);

        app.apply_event(RunEvent::BatchStarted {
            directory: None,
            total_jobs: 2,
        });
        app.apply_event(RunEvent::JobStarted {
            index: 0,
            job: jobs[0].clone(),
        });
        app.apply_event(RunEvent::CompileFinished {
            index: 0,
            job_name: "broken.c".into(),
            success: false,
        });
        app.apply_event(RunEvent::JobCompleted {
            index: 0,
            job_name: "broken.c".into(),
            outcome: BuildOutcome::CompileFailed {
                diagnostics: "broken.c:1: error: expected ';'\n".into(),
            },
            duration: Duration::from_millis(5),
        });
        assert!((app.execution_progress() - 0.5).abs() < f64::EPSILON);

        app.apply_event(RunEvent::JobStarted {
            index: 1,
            job: jobs[1].clone(),
        });
        app.apply_event(RunEvent::ProgramOutput {
            index: 1,
            job_name: "hello.c".into(),
            line: "Hello".into(),
            is_error: false,
        });
        app.apply_event(RunEvent::JobCompleted {
            index: 1,
            job_name: "hello.c".into(),
            outcome: BuildOutcome::RunSucceeded {
                stdout: "Hello\n".into(),
            },
            duration: Duration::from_millis(5),
        });
        app.apply_event(RunEvent::BatchCompleted {
            succeeded: 1,
            failed: 1,
            duration: Duration::from_millis(10),
        });

        let exec = app.execution_state.as_ref().unwrap();
        assert!(exec.is_complete);
        assert_eq!(exec.jobs[0].status, JobStatus::CompileFailed);
        assert_eq!(exec.jobs[1].status, JobStatus::Succeeded);

        let texts: Vec<&str> = exec.output_lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "broken.c: Compilation failed",
                "broken.c:1: error: expected ';'",
                "",
                "hello.c: Success",
                "Hello",
                "",
                "1 succeeded, 1 failed",
            ]
        );
        assert_eq!(exec.output_lines[0].kind, OutputKind::Failure);
        assert_eq!(exec.output_lines[3].kind, OutputKind::Success);
        assert_eq!(app.execution_progress(), 1.0);
    }

    #[test]
    fn test_empty_batch_warns() {
        let (_temp, mut app) = app_with_jobs(&[]);
        app.begin_execution(RunMode::All, &[]);
        app.apply_event(RunEvent::BatchStarted {
            directory: None,
            total_jobs: 0,
        });

        let exec = app.execution_state.as_ref().unwrap();
        assert_eq!(exec.output_lines[0].kind, OutputKind::Warning);
        assert_eq!(
            exec.output_lines[0].text,
            "No jobs available to compile and run."
        );
    }

    #[test]
    fn test_log_search() {
        let (_temp, mut app) = app_with_jobs(&[]);
        app.begin_execution(RunMode::One, &[job("a.c")]);
        app.apply_event(RunEvent::ProgramOutput {
            index: 0,
            job_name: "a.c".into(),
            line: "first".into(),
            is_error: false,
        });
        app.apply_event(RunEvent::ProgramOutput {
            index: 0,
            job_name: "a.c".into(),
            line: "Second match".into(),
            is_error: false,
        });
        app.apply_event(RunEvent::ProgramOutput {
            index: 0,
            job_name: "a.c".into(),
            line: "third MATCH".into(),
            is_error: false,
        });

        app.open_log_viewer();
        app.start_search();
        for c in "match".chars() {
            app.search_push_char(c);
        }
        assert_eq!(app.log_viewer.search_matches, vec![1, 2]);

        app.confirm_search();
        assert_eq!(app.log_viewer.scroll_offset, 1);
        app.next_search_match();
        assert_eq!(app.log_viewer.scroll_offset, 2);
        app.next_search_match();
        assert_eq!(app.log_viewer.scroll_offset, 1);
    }

    #[test]
    fn test_log_filter_cycles_jobs() {
        let (_temp, mut app) = app_with_jobs(&[]);
        app.begin_execution(RunMode::All, &[job("a.c"), job("b.c")]);
        for (index, name) in ["a.c", "b.c"].iter().enumerate() {
            app.apply_event(RunEvent::ProgramOutput {
                index,
                job_name: name.to_string(),
                line: format!("from {}", name),
                is_error: false,
            });
        }
        app.apply_event(RunEvent::BatchCompleted {
            succeeded: 2,
            failed: 0,
            duration: Duration::ZERO,
        });
        app.open_log_viewer();
        assert_eq!(app.filtered_output_lines().len(), 3);

        app.cycle_job_filter();
        assert_eq!(app.log_viewer.filter_job.as_deref(), Some("a.c"));
        let texts: Vec<_> = app
            .filtered_output_lines()
            .iter()
            .map(|l| l.text.clone())
            .collect();
        assert_eq!(texts, vec!["from a.c"]);

        app.cycle_job_filter();
        assert_eq!(app.log_viewer.filter_job.as_deref(), Some("b.c"));
        app.cycle_job_filter();
        assert_eq!(app.log_viewer.filter_job, None);
    }

    #[test]
    fn test_go_back_from_help() {
        let (_temp, mut app) = app_with_jobs(&[]);
        app.open_help();
        assert_eq!(app.mode_index(), 3);
        app.go_back();
        assert_eq!(app.state, AppState::JobList);
        assert!(!app.should_quit);
        app.go_back();
        assert!(app.should_quit);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_all_end_to_end() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("hello.c"), "#!/bin/sh\necho Hello\n").unwrap();
        let config = RunnerConfig::default()
            .with_jobs_dir(temp.path())
            .with_compiler("sh")
            .with_compiler_args(["-c", r#"cp "$1" "$3" && chmod +x "$3""#, "fake-cc"]);
        let mut app = App::new(config, temp.path());

        app.request_execution(RunMode::All);
        let mode = app.pending_execution.take().unwrap();
        app.start_execution(mode);

        for _ in 0..500 {
            app.process_run_events();
            if app.execution_state.as_ref().is_some_and(|e| e.is_complete) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let exec = app.execution_state.as_ref().unwrap();
        assert!(exec.is_complete);
        assert_eq!(exec.succeeded, 1);
        assert!(exec.output_lines.iter().any(|l| l.text == "Hello"));
        assert!(app.event_receiver.is_none());
    }
}

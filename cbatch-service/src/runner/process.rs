// Process Runner
// Spawns a program from an argument vector and captures its output streams

use std::ffi::OsStr;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Output collected from a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output, byte for byte (lossily decoded)
    pub stdout: String,
    /// Standard error, byte for byte (lossily decoded)
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal or never started
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Callback for handling output lines in real-time: `(line, is_stderr)`
pub type OutputCallback = Box<dyn Fn(&str, bool) + Send + Sync>;

/// Runs external programs directly, never through a shell
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run `program` with `args` and wait for it to exit
    pub async fn run<P, I, S>(&self, program: P, args: I) -> ProcessOutput
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.spawn_and_collect(program.as_ref(), args, None).await
    }

    /// Run `program` with `args`, reporting each output line as it arrives
    pub async fn run_streaming<P, I, S>(
        &self,
        program: P,
        args: I,
        on_output: OutputCallback,
    ) -> ProcessOutput
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.spawn_and_collect(program.as_ref(), args, Some(Arc::new(on_output)))
            .await
    }

    async fn spawn_and_collect<I, S>(
        &self,
        program: &OsStr,
        args: I,
        on_output: Option<Arc<OutputCallback>>,
    ) -> ProcessOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        // Quitting the runner mid-job must not leave the program behind
        cmd.kill_on_drop(true);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                let program = program.to_string_lossy();
                tracing::warn!(program = %program, error = %e, "failed to spawn process");
                return ProcessOutput {
                    stdout: String::new(),
                    stderr: format!("Failed to spawn process '{}': {}", program, e),
                    exit_code: None,
                };
            }
        };

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            let _ = child.kill().await;
            return ProcessOutput {
                stderr: "Process output streams were not captured".to_string(),
                ..ProcessOutput::default()
            };
        };

        // Drain both pipes concurrently so neither can fill up and stall the child
        let stdout_handle = tokio::spawn(collect_stream(stdout, false, on_output.clone()));
        let stderr_handle = tokio::spawn(collect_stream(stderr, true, on_output));

        let exit_code = match child.wait().await {
            Ok(status) => status.code(),
            Err(e) => {
                tracing::warn!(error = %e, "failed waiting for process");
                None
            }
        };

        ProcessOutput {
            stdout: stdout_handle.await.unwrap_or_default(),
            stderr: stderr_handle.await.unwrap_or_default(),
            exit_code,
        }
    }
}

async fn collect_stream<R>(
    reader: R,
    is_error: bool,
    on_output: Option<Arc<OutputCallback>>,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut collected = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if let Some(callback) = &on_output {
                    let text = String::from_utf8_lossy(&line);
                    callback(text.trim_end_matches(&['\n', '\r'][..]), is_error);
                }
                collected.extend_from_slice(&line);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed reading process output");
                break;
            }
        }
    }

    String::from_utf8_lossy(&collected).into_owned()
}

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error};
use wait_timeout::ChildExt;

use gitstamp_core::{CommandOutput, CommandPort, PortError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs commands as child processes.
///
/// Both pipes are drained on their own threads while the parent waits, so a
/// child writing more than the OS pipe buffer never blocks on an unread pipe.
/// The timeout covers the whole call: waiting for the child and for both
/// pipes to close.
#[derive(Debug, Clone)]
pub struct ProcessCommandAdapter {
    timeout: Option<Duration>,
}

impl Default for ProcessCommandAdapter {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ProcessCommandAdapter {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Waits for the child indefinitely.
    pub fn without_timeout() -> Self {
        Self { timeout: None }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl CommandPort for ProcessCommandAdapter {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        working_dir: &Path,
    ) -> Result<CommandOutput, PortError> {
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut child = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PortError::Spawn {
                program: program.to_owned(),
                message: e.to_string(),
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let waited = match deadline {
            Some(deadline) => child.wait_timeout(remaining(deadline)),
            None => child.wait().map(Some),
        };
        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => {
                reap(&mut child);
                error!(%program, ?args, timeout = ?self.timeout, "command timed out");
                return Err(self.timeout_error());
            }
            Err(e) => {
                reap(&mut child);
                return Err(io_error(e));
            }
        };

        // A grandchild can keep the pipes open after the child exits, so
        // the readers share the same deadline. Reader threads left behind on
        // expiry are detached.
        let stdout = self.collect(&stdout, deadline, program)?;
        let stderr = self.collect(&stderr, deadline, program)?;
        debug!(%program, ?args, code = ?status.code(), stdout_len = stdout.len(), "command finished");

        Ok(CommandOutput::from_raw(status.code(), stdout, stderr))
    }
}

impl ProcessCommandAdapter {
    fn timeout_error(&self) -> PortError {
        let ms = self.timeout.map_or(0, |t| t.as_millis() as u64);
        PortError::Timeout(ms)
    }

    fn collect(
        &self,
        output: &Receiver<io::Result<Vec<u8>>>,
        deadline: Option<Instant>,
        program: &str,
    ) -> Result<String, PortError> {
        let received = match deadline {
            Some(deadline) => output.recv_timeout(remaining(deadline)),
            None => output.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        let bytes = match received {
            Ok(read) => read.map_err(io_error)?,
            Err(RecvTimeoutError::Timeout) => {
                error!(%program, timeout = ?self.timeout, "command output still open at timeout");
                return Err(self.timeout_error());
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(PortError::Io("output reader thread panicked".to_owned()));
            }
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn drain<R>(stream: Option<R>) -> Receiver<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let read = match stream {
            Some(mut stream) => stream.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        let _ = tx.send(read);
    });
    rx
}

fn remaining(deadline: Instant) -> Duration {
    deadline.saturating_duration_since(Instant::now())
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn io_error(e: io::Error) -> PortError {
    PortError::Io(e.to_string())
}

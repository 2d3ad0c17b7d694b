// ABOUTME: Channel-backed stream of process output events.
// ABOUTME: Forwards lines to an ExecListener in the order the process produced them.

use tokio::sync::mpsc;

use super::{ExecError, ExecResult};

/// One occurrence on a streamed process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecEvent {
    /// A line written to stdout.
    Stdout(String),
    /// A line written to stderr.
    Stderr(String),
    /// Executor-level failure while the process was running.
    Error(String),
    /// Process terminated with this exit code. Always the last event.
    Closed(i32),
}

/// Receives streamed process output.
pub trait ExecListener {
    fn on_output(&self, line: &str);
    fn on_error(&self, line: &str);
}

/// Listener that drops everything.
impl ExecListener for () {
    fn on_output(&self, _line: &str) {}
    fn on_error(&self, _line: &str) {}
}

/// Receiving half of a streamed process.
#[derive(Debug)]
pub struct ExecStream {
    rx: mpsc::UnboundedReceiver<ExecEvent>,
}

impl ExecStream {
    /// Create a connected sender/stream pair.
    pub fn channel() -> (mpsc::UnboundedSender<ExecEvent>, ExecStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, ExecStream { rx })
    }

    /// Next event, or `None` once the sender is gone.
    pub async fn next(&mut self) -> Option<ExecEvent> {
        self.rx.recv().await
    }

    /// Drain the stream into `listener`, returning the accumulated output.
    ///
    /// Stdout lines go to `on_output`; stderr lines and executor errors go to
    /// `on_error`. Returns [`ExecError::Interrupted`] if the stream ends
    /// without a `Closed` event.
    pub async fn forward(mut self, listener: &dyn ExecListener) -> Result<ExecResult, ExecError> {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        while let Some(event) = self.next().await {
            match event {
                ExecEvent::Stdout(line) => {
                    listener.on_output(&line);
                    stdout.push(line);
                }
                ExecEvent::Stderr(line) => {
                    listener.on_error(&line);
                    stderr.push(line);
                }
                ExecEvent::Error(message) => {
                    tracing::warn!("process error: {}", message);
                    listener.on_error(&message);
                }
                ExecEvent::Closed(exit_code) => {
                    return Ok(ExecResult {
                        stdout: stdout.join("\n"),
                        stderr: stderr.join("\n"),
                        exit_code,
                    });
                }
            }
        }

        Err(ExecError::Interrupted)
    }
}

// ABOUTME: Test support utilities.
// ABOUTME: Scripted process executor, recording listeners, and tracing setup.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use async_trait::async_trait;
use parking_lot::Mutex;
use shiftdeploy::deploy::{Clients, DeploymentListener};
use shiftdeploy::docker::DockerClient;
use shiftdeploy::exec::{ExecError, ExecEvent, ExecResult, ExecStream, ProcessExecutor};
use shiftdeploy::oc::{OcClient, OcOptions};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("shiftdeploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// One line of scripted process output.
#[derive(Debug, Clone)]
pub enum Line {
    Out(String),
    Err(String),
}

/// Scripted outcome of one invocation.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub lines: Vec<Line>,
    pub exit_code: i32,
}

impl Reply {
    /// Exit 0 with `stdout` split into lines.
    pub fn ok(stdout: &str) -> Self {
        Self {
            lines: stdout.lines().map(|l| Line::Out(l.to_string())).collect(),
            exit_code: 0,
        }
    }

    /// Exit `code` with `stderr` split into lines.
    pub fn fail(stderr: &str, code: i32) -> Self {
        Self {
            lines: stderr.lines().map(|l| Line::Err(l.to_string())).collect(),
            exit_code: code,
        }
    }

    pub fn lines(lines: Vec<Line>, exit_code: i32) -> Self {
        Self { lines, exit_code }
    }

    fn result(&self) -> ExecResult {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        for line in &self.lines {
            match line {
                Line::Out(l) => stdout.push(l.as_str()),
                Line::Err(l) => stderr.push(l.as_str()),
            }
        }
        ExecResult {
            stdout: stdout.join("\n"),
            stderr: stderr.join("\n"),
            exit_code: self.exit_code,
        }
    }
}

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub streamed: bool,
}

impl Call {
    /// `program arg arg ...`
    pub fn line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Executor that answers from a script and records every call.
///
/// Rules match on program and argument prefix; the first match wins.
/// Unmatched calls succeed with no output.
#[derive(Default)]
pub struct FakeExecutor {
    rules: Mutex<Vec<(String, Vec<String>, Reply)>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, program: &str, prefix: &[&str], reply: Reply) -> &Self {
        self.rules.lock().push((
            program.to_string(),
            prefix.iter().map(|s| s.to_string()).collect(),
            reply,
        ));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_lines(&self) -> Vec<String> {
        self.calls().iter().map(Call::line).collect()
    }

    fn reply(&self, program: &str, args: &[String], streamed: bool) -> Reply {
        self.calls.lock().push(Call {
            program: program.to_string(),
            args: args.to_vec(),
            streamed,
        });
        self.rules
            .lock()
            .iter()
            .find(|(p, prefix, _)| p == program && args.starts_with(prefix))
            .map(|(_, _, reply)| reply.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProcessExecutor for FakeExecutor {
    async fn exec(&self, program: &str, args: &[String]) -> Result<ExecResult, ExecError> {
        Ok(self.reply(program, args, false).result())
    }

    async fn exec_streaming(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ExecStream, ExecError> {
        let reply = self.reply(program, args, true);
        let (tx, stream) = ExecStream::channel();
        for line in reply.lines {
            let event = match line {
                Line::Out(l) => ExecEvent::Stdout(l),
                Line::Err(l) => ExecEvent::Stderr(l),
            };
            let _ = tx.send(event);
        }
        let _ = tx.send(ExecEvent::Closed(reply.exit_code));
        Ok(stream)
    }
}

/// Clients over a shared fake executor.
pub struct Fixture {
    pub executor: Arc<FakeExecutor>,
    pub oc: OcClient<FakeExecutor>,
    pub docker: DockerClient<FakeExecutor>,
}

impl Fixture {
    pub fn new() -> Self {
        let executor = FakeExecutor::new();
        Self {
            oc: OcClient::new("oc", Arc::clone(&executor)),
            docker: DockerClient::new("docker", Arc::clone(&executor)),
            executor,
        }
    }

    pub fn clients(&self) -> Clients<'_, FakeExecutor> {
        Clients {
            oc: &self.oc,
            docker: &self.docker,
            options: OcOptions::default(),
        }
    }
}

/// Listener callback as recorded by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Message(String),
    Failure { message: String, cause: String },
    NotExposed(String),
    Route(Option<String>),
}

#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<Event>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Message(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Failure { message, cause } => Some((message, cause)),
                _ => None,
            })
            .collect()
    }

    pub fn not_exposed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::NotExposed(_)))
            .count()
    }

    pub fn routes(&self) -> Vec<Option<String>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Route(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// Position of the first message containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.messages().iter().position(|m| m.contains(needle))
    }
}

impl DeploymentListener for RecordingListener {
    fn on_message(&self, message: &str) {
        self.events.lock().push(Event::Message(message.to_string()));
    }

    fn on_failure(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        self.events.lock().push(Event::Failure {
            message: message.to_string(),
            cause: cause.to_string(),
        });
    }

    fn on_not_exposed(&self, message: &str) {
        self.events
            .lock()
            .push(Event::NotExposed(message.to_string()));
    }

    fn on_route(&self, route: Option<&str>) {
        self.events.lock().push(Event::Route(route.map(str::to_string)));
    }
}

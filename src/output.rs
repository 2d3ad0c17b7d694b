// ABOUTME: Output formatting for CLI feedback and the deployment transcript.
// ABOUTME: Renders progress, dots and results as text, bare results, or JSON lines.

use serde::Serialize;
use std::cell::Cell;
use std::io::Write;
use std::time::Instant;

use crate::deploy::DeploymentListener;

/// How much the CLI prints, and in what shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress, deployment transcript and results.
    Normal,
    /// Results and errors only.
    Quiet,
    /// One JSON object per line on stdout.
    Json,
}

/// CLI transcript. Also serves as the [`DeploymentListener`] for `deploy`.
pub struct Output {
    mode: OutputMode,
    started: Option<Instant>,
    // Set while a line of poll dots is open.
    ticking: Cell<bool>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            started: None,
            ticking: Cell::new(false),
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Report durations on success from now on.
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    fn duration_secs(&self) -> Option<f64> {
        self.started.map(|t| t.elapsed().as_secs_f64())
    }

    fn end_ticks(&self) {
        if self.ticking.replace(false) {
            println!();
        }
    }

    fn emit(&self, event: JsonEvent<'_>, to_stderr: bool) {
        if let Ok(json) = serde_json::to_string(&event) {
            if to_stderr {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
        }
    }

    /// Print a progress message (suppressed in quiet mode).
    pub fn progress(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                self.end_ticks();
                println!("{message}");
            }
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit(JsonEvent::new("progress", message), false),
        }
    }

    /// Print a line of plain data, such as a list entry (in every mode but JSON).
    pub fn item(&self, value: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                self.end_ticks();
                println!("{value}");
            }
            OutputMode::Json => self.emit(JsonEvent::new("item", value), false),
        }
    }

    /// Final result; normal mode appends the time since `start_timer`.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                self.end_ticks();
                match self.duration_secs() {
                    Some(secs) => println!("{message} ({secs:.1}s)"),
                    None => println!("{message}"),
                }
            }
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => {
                let mut event = JsonEvent::new("success", message);
                event.duration_secs = self.duration_secs();
                self.emit(event, false);
            }
        }
    }

    /// Print a warning (suppressed in quiet mode).
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                self.end_ticks();
                eprintln!("Warning: {message}");
            }
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit(JsonEvent::new("warning", message), true),
        }
    }

    /// Errors always reach stderr, even in quiet mode.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                self.end_ticks();
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let mut event = JsonEvent::new("error", message);
                event.duration_secs = self.duration_secs();
                self.emit(event, true);
            }
        }
    }

    /// Append a dot to the running transcript while polling.
    pub fn tick(&self) {
        if self.mode == OutputMode::Normal {
            print!(".");
            let _ = std::io::stdout().flush();
            self.ticking.set(true);
        }
    }

    /// Serialize `value` as one JSON line.
    pub fn json<T: Serialize>(&self, value: &T) {
        self.end_ticks();
        match serde_json::to_string(value) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("failed to serialize output: {}", e),
        }
    }
}

impl DeploymentListener for Output {
    fn on_message(&self, message: &str) {
        self.progress(message);
    }

    fn on_failure(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        match self.mode {
            OutputMode::Json => {
                let cause = cause.to_string();
                let mut event = JsonEvent::new("failure", message);
                event.cause = Some(&cause);
                self.emit(event, true);
            }
            _ => self.error(&format!("{message}: {cause}")),
        }
    }

    fn on_not_exposed(&self, message: &str) {
        match self.mode {
            OutputMode::Json => self.emit(JsonEvent::new("not_exposed", message), false),
            _ => self.progress(message),
        }
    }

    fn on_route(&self, route: Option<&str>) {
        match self.mode {
            OutputMode::Json => {
                let mut event = JsonEvent::new("route", route.unwrap_or(""));
                event.route = route;
                self.emit(event, false);
            }
            _ if route.is_none() => self.warning("no route was reported for the application"),
            _ => {}
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

impl<'a> JsonEvent<'a> {
    fn new(event: &'a str, message: &'a str) -> Self {
        Self {
            event,
            message,
            route: None,
            cause: None,
            duration_secs: None,
        }
    }
}

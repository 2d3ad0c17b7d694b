// ABOUTME: Listener interface through which the orchestrator reports progress.
// ABOUTME: MessageForwarder adapts it to receive streamed process output.

use crate::exec::ExecListener;

/// Receives the transcript of one deployment attempt.
///
/// Callbacks arrive in phase order. `on_route` is the terminal signal of an
/// attempt that reached route discovery.
pub trait DeploymentListener {
    fn on_message(&self, message: &str);
    fn on_failure(&self, message: &str, cause: &(dyn std::error::Error + 'static));
    fn on_not_exposed(&self, message: &str);
    fn on_route(&self, route: Option<&str>);
}

/// Forwards process output lines, stdout and stderr alike, to `on_message`.
pub struct MessageForwarder<'a, L: ?Sized>(pub &'a L);

impl<L: DeploymentListener + ?Sized> ExecListener for MessageForwarder<'_, L> {
    fn on_output(&self, line: &str) {
        self.0.on_message(line);
    }

    fn on_error(&self, line: &str) {
        self.0.on_message(line);
    }
}

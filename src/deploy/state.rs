// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Later states carry the data earlier phases produced.

/// Initial state: nothing has run yet.
/// Available actions: `stage()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Staged: the image was pushed where the mode requires.
/// Available actions: `deploy()`
#[derive(Debug, Clone, Default)]
pub struct Staged {
    pub(crate) image_stream: Option<String>,
}

impl Staged {
    /// Image stream created during staging, if any.
    pub fn image_stream(&self) -> Option<&str> {
        self.image_stream.as_deref()
    }
}

/// Deployed: the application exists in the project.
/// Available actions: `check_exposure()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Deployed;

/// Exposable: the image declares at least one port.
/// Available actions: `expose()`, `route()`
#[derive(Debug, Clone)]
pub struct Exposable {
    pub(crate) app_name: String,
    pub(crate) ports: Vec<String>,
}

impl Exposable {
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn ports(&self) -> &[String] {
        &self.ports
    }
}

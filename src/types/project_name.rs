// ABOUTME: OpenShift project name validation.
// ABOUTME: Lowercase alphanumerics and inner hyphens, 2 to 63 characters.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectNameError {
    #[error("project name is empty")]
    Empty,

    #[error("project name must be between 2 and 63 characters")]
    InvalidLength,

    #[error("project name cannot start or end with a hyphen")]
    Hyphen,

    #[error("invalid character in project name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(value: &str) -> Result<Self, ProjectNameError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ProjectNameError::Empty);
        }

        if value.len() < 2 || value.len() > 63 {
            return Err(ProjectNameError::InvalidLength);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(ProjectNameError::InvalidChar(c));
        }

        if value.starts_with('-') || value.ends_with('-') {
            return Err(ProjectNameError::Hyphen);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

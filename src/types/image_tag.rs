// ABOUTME: Local image reference as typed by the user or listed by the engine.
// ABOUTME: Validated only as far as the oc and docker CLIs need.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageTagError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0:?}")]
    InvalidChar(char),

    #[error("image reference cannot start with '{0}'")]
    InvalidStart(char),
}

/// An image reference such as `nginx`, `acme/web:1.2` or `quay.io/acme/web@sha256:...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageTag(String);

impl ImageTag {
    pub fn parse(input: &str) -> Result<Self, ImageTagError> {
        let input = input.trim();
        let first = input.chars().next().ok_or(ImageTagError::Empty)?;
        if matches!(first, '-' | ':' | '/' | '@' | '.') {
            return Err(ImageTagError::InvalidStart(first));
        }

        if let Some(c) = input
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '/' | ':' | '.' | '-' | '_' | '@'))
        {
            return Err(ImageTagError::InvalidChar(c));
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag after the last `:` of the final path segment, if any.
    pub fn tag(&self) -> Option<&str> {
        let without_digest = self.0.split('@').next().unwrap_or(&self.0);
        let last = without_digest.rsplit('/').next().unwrap_or(without_digest);
        last.split_once(':').map(|(_, tag)| tag)
    }
}

impl FromStr for ImageTag {
    type Err = ImageTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

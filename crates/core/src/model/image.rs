use std::fmt;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageRefError {
    #[error("image url cannot be empty")]
    Empty,

    #[error("invalid image url: {0}")]
    Invalid(String),

    #[error("unsupported image url scheme: {0}")]
    UnsupportedScheme(String),
}

/// Location of a celebration image shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(Url);

impl ImageRef {
    /// Parse an absolute `http`/`https` URL.
    ///
    /// # Errors
    ///
    /// Returns `ImageRefError` if the input is blank, not a URL, or uses another scheme.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ImageRefError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(ImageRefError::Empty);
        }
        let url = Url::parse(s).map_err(|err| ImageRefError::Invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(ImageRefError::UnsupportedScheme(other.to_string())),
        }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

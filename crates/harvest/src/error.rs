// ABOUTME: Error types for the harvester including the ErrorCode enum and HarvestError struct.
// ABOUTME: Only environment failures surface here; catalog end conditions are not errors.

use std::fmt;

use partlib_catalog::CatalogError;

/// Categories of failures that abort a harvest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Launch,
    Navigate,
    Session,
    Layout,
    Output,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Launch => "browser launch failed",
            ErrorCode::Navigate => "navigation failed",
            ErrorCode::Session => "browser session error",
            ErrorCode::Layout => "invalid catalog layout",
            ErrorCode::Output => "output error",
        };
        write!(f, "{}", s)
    }
}

/// The error type for harvest operations.
#[derive(Debug, thiserror::Error)]
pub struct HarvestError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for HarvestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "harvest: {}", self.op)?;
        if !self.url.is_empty() {
            write!(f, " {}", self.url)?;
        }
        write!(f, ": {}", self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl HarvestError {
    fn new(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Launch error.
    pub fn launch(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::new(ErrorCode::Launch, String::new(), op, source)
    }

    /// Create a Navigate error.
    pub fn navigate(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Navigate, url, op, source)
    }

    /// Create a Session error.
    pub fn session(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Session, url, op, source)
    }

    /// Create an Output error for a file path.
    pub fn output(
        path: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Output, path, op, source)
    }

    /// Returns true if this is a Launch error.
    pub fn is_launch(&self) -> bool {
        self.code == ErrorCode::Launch
    }

    /// Returns true if this is a Navigate error.
    pub fn is_navigate(&self) -> bool {
        self.code == ErrorCode::Navigate
    }

    /// Returns true if this is a Session error.
    pub fn is_session(&self) -> bool {
        self.code == ErrorCode::Session
    }

    /// Returns true if this is a Layout error.
    pub fn is_layout(&self) -> bool {
        self.code == ErrorCode::Layout
    }

    /// Returns true if this is an Output error.
    pub fn is_output(&self) -> bool {
        self.code == ErrorCode::Output
    }
}

impl From<CatalogError> for HarvestError {
    fn from(err: CatalogError) -> Self {
        Self::new(ErrorCode::Layout, String::new(), "load layout", Some(err.into()))
    }
}

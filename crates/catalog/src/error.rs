// ABOUTME: Error types for catalog parsing and layout loading.
// ABOUTME: Provides CatalogError enum with Selector, Layout, and Json variants.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while preparing catalog extraction.
///
/// Row-level problems (missing part number, placeholder cells, pattern
/// misses) are not errors; they surface as absent data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A CSS selector in the layout failed to compile.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// The layout is structurally unusable.
    #[error("invalid layout: {0}")]
    Layout(String),

    /// Layout or record JSON could not be decoded.
    #[error("failed to decode json: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Creates a Selector error from a selector parse failure.
    pub fn selector(selector: impl Into<String>, reason: impl fmt::Display) -> Self {
        CatalogError::Selector {
            selector: selector.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a Layout error with a custom message.
    pub fn layout(msg: impl Into<String>) -> Self {
        CatalogError::Layout(msg.into())
    }
}

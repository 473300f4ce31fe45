//! Error module for QuadBloom.
//!
//! Component errors (`BloomFilterError`, `ConfigError`) convert into the
//! application-level [`QuadBloomError`] through `?`.

use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::data_structures::bloom_filter::BloomFilterError;

pub mod config;

/// Result type alias used throughout QuadBloom.
pub type QuadBloomResult<T> = Result<T, QuadBloomError>;

/// Core error enum for QuadBloom.
#[derive(Error, Debug)]
pub enum QuadBloomError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors constructing a Bloom filter.
    #[error("Filter error: {0}")]
    Filter(#[from] BloomFilterError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors when rendering reports.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// An error together with the component that produced it.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: QuadBloomError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    pub fn new<S: Into<String>>(error: QuadBloomError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Sink for reporting errors with context.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    fn report(&self, context: &ErrorContext);
}

/// Reports errors through the tracing framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: &ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}

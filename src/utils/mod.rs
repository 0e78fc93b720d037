//! Utils module - Shared utilities and helpers

/// reqwest/serde error conversion with endpoint context
pub mod error_helpers;

/// env_logger setup and verbose console output
pub mod logging;

/// API root and endpoint URL composition
pub mod url;

/// Connection setting validation
pub mod validation;

//! fonz: run one query per Looker explore on a development branch and
//! report every explore whose generated SQL fails.

pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Session setup and validation logic
pub mod storage; // Configuration profiles and credentials

/// Support modules (used across layers)
pub mod api; // Looker API client
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod exit_codes; // Process exit codes
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;

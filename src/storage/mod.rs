//! Storage layer for fonz
//!
//! TOML connection profiles and environment-based credentials.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;

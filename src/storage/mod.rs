//! Storage layer
//!
//! Handles configuration resolution and credential persistence. The config
//! file is TOML; the credential is a single token in an owner-only file.

use crate::error::StorageError;

/// Config file parsing and layered resolution into the effective configuration
pub mod config;

/// File-backed bearer token store
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;

//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Input validation and URL normalization
pub mod validation;

/// Item extraction from list-shaped response bodies
pub mod data;

/// Bounded retry policy for API operations
pub mod retry;

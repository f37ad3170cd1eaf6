//! Shared utilities for depot.
//!
//! This crate provides the cross-cutting pieces every other depot crate uses:
//! the unified error type and a few filesystem helpers for locating
//! configuration and repositories.

pub mod errors;
pub mod fs;

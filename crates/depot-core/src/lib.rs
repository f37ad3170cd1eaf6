//! Core data types for depot.
//!
//! This crate defines the vocabulary shared by the metadata reader and the
//! dependency graph engine: artifact coordinates and mediation keys, scopes
//! and their propagation rules, exclusions, dependency-management entries,
//! and configuration.
//!
//! This crate is intentionally free of async code and I/O beyond reading
//! configuration files.

pub mod config;
pub mod coordinate;
pub mod dependency;
pub mod scope;

//! # portrisk-core
//!
//! Shared vocabulary for the port-risk Likert analysis engine.
//! Domain enums, bounded response values, errors, configuration,
//! tracing setup, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

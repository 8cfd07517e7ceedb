//! Shared helpers used across the engine.
//!
//! - [`id_generator`]: session identifier generation
//! - [`json_ext`]: JSON type inspection used by decode diagnostics

pub mod id_generator;
pub mod json_ext;

//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`target_url`] - Link target validation

pub mod code_generator;
pub mod target_url;

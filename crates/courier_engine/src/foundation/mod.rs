//! Foundation module - Core utilities and types
//!
//! - Math types and operations
//! - Collaborator handle types
//! - Logging utilities

pub mod handles;
pub mod logging;
pub mod math;

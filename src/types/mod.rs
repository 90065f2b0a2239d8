//! This module defines the core, strongly-typed data representations used
//! throughout the crate.
//!
//! It includes the canonical `DataType` enum, which replaces fragile
//! string-based dtype handling with a safe, serializable enum, and the
//! `Scalar`/`Element` traits tying concrete Rust types to their tags.

pub mod data_type;
pub mod scalar;

// Re-export the main types for easier access.
pub use data_type::DataType;
pub use scalar::{Element, Scalar};

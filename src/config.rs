// In: src/config.rs

//! Decode-time configuration.
//!
//! Created once at the application boundary (e.g. from a user's YAML file)
//! and passed read-only into the decode entry points.

use serde::{Deserialize, Serialize};

/// Options governing how external payloads are decoded.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DecodeOptions {
    /// When true, a table column declaring a dtype outside the supported set
    /// (`float64`, `int64`, `bool`, `string`/`object`) is converted to its
    /// string representation, with a logged warning, instead of failing with
    /// `UnsupportedDType`. Off by default: silent degradation must be opted
    /// into explicitly.
    #[serde(default)]
    pub coerce_unsupported: bool,
}

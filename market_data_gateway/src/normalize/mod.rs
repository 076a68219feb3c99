//! Turning upstream payloads into canonical records.
//!
//! - [`keys`]: closed rename tables for every record kind.
//! - [`series`]: container discovery and date-keyed reshaping.
//! - [`tabular`]: comma-delimited text decoding.

pub mod keys;
pub mod series;
pub mod tabular;

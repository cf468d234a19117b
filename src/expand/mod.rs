//! Backreference expansion.
//!
//! This module handles:
//! - Parsing target templates into literal text and `$N` references
//! - Expanding a template against a single match with a transform applied to each group
//! - Global, non-overlapping replacement across a whole file name

pub mod replace;
pub mod template;

pub use replace::replace_all;
pub use template::{Reference, Segment, Template, expand};

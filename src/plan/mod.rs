//! Rename planning.
//!
//! This module handles:
//! - Compiling the selector pattern and target template for a run
//! - Deciding whether a file name qualifies (whole-name match)
//! - Computing destination names through the backreference expander

pub mod planner;

pub use planner::{Planner, RenameOperation, compile_regex, plan};

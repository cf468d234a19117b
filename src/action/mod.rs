//! Applying planned renames.
//!
//! This module handles:
//! - Dry-run, no-overwrite and confirmation gates
//! - The filesystem rename and its per-operation outcome
//! - Interactive yes/no confirmation

pub mod executor;
pub mod prompt;

pub use executor::{Outcome, Policy, apply};
pub use prompt::{Confirm, PromptConfirm};

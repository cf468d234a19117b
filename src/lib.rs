//! rxmv - batch file renamer driven by regex substitution.
//!
//! This library provides the core functionality for rxmv, including:
//! - Named backreference processors and transform chains
//! - `$N` template expansion with a transform applied to each group
//! - Rename planning and policy-gated filesystem renames
//! - Configuration file parsing and cascade discovery
//!
//! # Example
//!
//! ```
//! use rxmv_cli::plan::plan;
//! use rxmv_cli::transform::{Registry, TransformChain};
//!
//! let registry = Registry::builtin();
//! let chain = TransformChain::resolve(&registry, &["uppercase"]).unwrap();
//! let renamed = plan("draft_notes.txt", r"(\w+)_(\w+)\.txt", "$1-$2.txt", &chain).unwrap();
//! assert_eq!(renamed, "DRAFT-NOTES.txt");
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod expand;
pub mod plan;
pub mod report;
pub mod run;
pub mod transform;
pub mod walk;

pub use error::{ErrorKind, Result, RxmvError};

//! Backreference processors.
//!
//! This module handles:
//! - The closed catalog of primitive string transforms
//! - Built-in and configured composite processors
//! - Ordered transform chains built from processor names

pub mod chain;
pub mod primitives;
pub mod registry;

pub use chain::TransformChain;
pub use primitives::Primitive;
pub use registry::{Origin, Processor, Registry, normalize_name};

//! Extension configuration loading and binding.
//!
//! # Responsibility
//! - Model configuration sections and per-extension configuration maps.
//! - Define the collaborator strategies the binding behavior depends on.
//! - Bind section entries onto extension properties.
//!
//! # Invariants
//! - A missing section behaves exactly like an empty one.
//! - The binding pass performs no I/O; sections are resolved in memory.

pub mod binding;
pub mod conversion;
pub mod section;
pub mod store;
pub mod strategy;

//! Extension contracts.
//!
//! This module defines what a host-composed extension exposes to bootstrapper
//! behaviors: an identity, a property descriptor table and a setter.
//! Discovery and instantiation of extensions are out of scope.

pub mod contract;
pub mod property;

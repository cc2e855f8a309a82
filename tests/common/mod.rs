//! Shared test utilities for varlog integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Everything here is deterministic: parsing always runs
//! with [`YEAR`] as the assumed year, and on-disk trees live in temp dirs.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

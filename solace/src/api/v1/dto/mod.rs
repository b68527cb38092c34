//! v1 API Data Transfer Objects.
//!
//! Wire shapes for the HTTP surface, kept apart from the domain types they
//! convert into.

pub mod catalog;
pub mod support;

pub use catalog::*;
pub use support::*;

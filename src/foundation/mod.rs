//! Shared primitives: errors, bounds and 2D math.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;

//! Numerical helpers for exact enumeration inference.

pub mod math;

pub use math::ratio::*;
pub use math::sum::*;

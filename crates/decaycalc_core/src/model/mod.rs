//! Domain model for decay calculations.
//!
//! # Responsibility
//! - Define the isotope record and the four decay slots.
//! - Carry raw field text next to its parsed state, free of any UI concern.
//!
//! # Invariants
//! - Every isotope has a strictly positive half-life in seconds.
//! - A `SolveTarget` always carries exactly the three known values.

pub mod field;
pub mod isotope;
pub mod problem;

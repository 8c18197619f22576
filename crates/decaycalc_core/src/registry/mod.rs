//! Isotope catalog.
//!
//! # Responsibility
//! - Own the fixed isotope table and resolve labels to isotopes.
//! - Present isotopes in selector order.
//!
//! # Invariants
//! - Labels are unique; the registry is immutable after construction.
//! - The built-in registry is constructed once per process.

mod isotope_registry;

pub use isotope_registry::{builtin_isotopes, IsotopeRegistry, RegistryError, RegistryResult};

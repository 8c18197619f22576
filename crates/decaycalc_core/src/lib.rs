//! Core domain logic for the decay calculator.
//! This crate owns isotope data, field validation and the decay solver;
//! front ends only pass raw strings in and display strings out.

pub mod logging;
pub mod model;
pub mod parse;
pub mod preset;
pub mod registry;
pub mod service;
pub mod solver;

pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LogConfig,
};
pub use model::field::{FieldStatus, FieldValue, ParsedField, Slot};
pub use model::isotope::{HalfLifeUnit, Isotope, IsotopeError};
pub use model::problem::{DecayProblem, DecayRequest, DecayResult, RawFields, SolveTarget};
pub use preset::{default_preset, preset_by_name, presets, Preset, PresetError, PresetValue};
pub use registry::{IsotopeRegistry, RegistryError, RegistryResult};
pub use service::decay_service::{
    CalculationResponse, DecayService, FieldReport, IsotopeOption,
};
pub use solver::{solve, InvalidField, SolveError, SolveResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Decay calculation use-case service.
//!
//! # Responsibility
//! - Provide the entry points a front end calls: isotope list, solve, presets.
//! - Shape typed results into display strings and per-field statuses.
//!
//! # Invariants
//! - Every call returns a value; failures are carried in the response.
//! - The service holds no state beyond a shared, immutable registry.

use crate::model::field::{FieldStatus, Slot};
use crate::model::isotope::HalfLifeUnit;
use crate::model::problem::{DecayProblem, DecayRequest, DecayResult, RawFields};
use crate::parse::{format_activity, format_elapsed, format_ratio, format_timestamp};
use crate::preset::{preset_by_name, PresetError};
use crate::registry::IsotopeRegistry;
use crate::solver::{SolveError, SolveResult};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::Serialize;

/// One selector entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsotopeOption {
    pub label: String,
    pub halflife: f64,
    pub unit: HalfLifeUnit,
    pub halflife_text: String,
}

/// Validity of one field in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub slot: Slot,
    pub status: FieldStatus,
    /// Whether a front end should highlight this field.
    pub flagged: bool,
}

/// String envelope returned by [`DecayService::calculate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResponse {
    pub ok: bool,
    pub isotope: String,
    /// Slot text; the solved slot is filled in on success.
    pub fields: RawFields,
    pub solved: Option<Slot>,
    /// `[-][N days, ]H:MM:SS`, empty on failure.
    pub elapsed: String,
    /// Three-decimal `A1/A0`, empty on failure.
    pub ratio: String,
    pub statuses: Vec<FieldReport>,
    /// Empty on success.
    pub message: String,
}

/// Use-case service over an isotope registry.
#[derive(Debug, Clone, Copy)]
pub struct DecayService<'r> {
    registry: &'r IsotopeRegistry,
}

impl DecayService<'static> {
    /// Service over the built-in isotope table.
    pub fn builtin() -> Self {
        Self::new(IsotopeRegistry::builtin())
    }
}

impl<'r> DecayService<'r> {
    pub fn new(registry: &'r IsotopeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r IsotopeRegistry {
        self.registry
    }

    /// Selector entries ordered by mass.
    pub fn list_isotopes(&self) -> Vec<IsotopeOption> {
        self.registry
            .list()
            .into_iter()
            .map(|isotope| IsotopeOption {
                label: isotope.label.clone(),
                halflife: isotope.halflife,
                unit: isotope.halflife_unit,
                halflife_text: isotope.halflife_text(),
            })
            .collect()
    }

    /// Typed solve path.
    ///
    /// # Errors
    /// - `UnknownIsotope` when the label is not registered.
    /// - Any validation or domain error from the problem itself.
    pub fn solve(&self, request: &DecayRequest) -> SolveResult<DecayResult> {
        let isotope = self.registry.lookup(request.isotope.as_str())?;
        DecayProblem::parse(&request.fields, isotope).solve()
    }

    /// String-level solve used by front ends.
    pub fn calculate(&self, request: &DecayRequest) -> CalculationResponse {
        debug!(
            "event=decay_calculate module=service status=start isotope={}",
            request.isotope.trim()
        );
        let statuses = request.fields.statuses();

        match self.solve(request) {
            Ok(result) => {
                info!(
                    "event=decay_calculate module=service status=ok isotope={} solved={} elapsed_s={:.3}",
                    request.isotope.trim(),
                    result.solved,
                    result.elapsed_seconds
                );
                CalculationResponse {
                    ok: true,
                    isotope: request.isotope.trim().to_string(),
                    fields: filled_fields(&request.fields, &result),
                    solved: Some(result.solved),
                    elapsed: format_elapsed(result.elapsed_seconds),
                    ratio: format_ratio(result.ratio),
                    statuses: reports(&statuses, &[]),
                    message: String::new(),
                }
            }
            Err(err) => {
                warn!(
                    "event=decay_calculate module=service status=error isotope={} error={}",
                    request.isotope.trim(),
                    err
                );
                CalculationResponse {
                    ok: false,
                    isotope: request.isotope.trim().to_string(),
                    fields: request.fields.clone(),
                    solved: None,
                    elapsed: String::new(),
                    ratio: String::new(),
                    statuses: reports(&statuses, &err.offending_slots()),
                    message: error_message(&err),
                }
            }
        }
    }

    /// Resolves a preset against `now`.
    pub fn preset_request(
        &self,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<DecayRequest, PresetError> {
        Ok(preset_by_name(name)?.resolve(now))
    }

    /// Resolves a preset and calculates it right away.
    pub fn apply_preset(
        &self,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<CalculationResponse, PresetError> {
        let request = self.preset_request(name, now)?;
        info!(
            "event=preset_apply module=service status=ok preset={}",
            name.trim()
        );
        Ok(self.calculate(&request))
    }
}

fn filled_fields(raw: &RawFields, result: &DecayResult) -> RawFields {
    let mut fields = RawFields::default();
    for slot in Slot::ALL {
        fields.set(slot, raw.get(slot).trim());
    }
    let solved_text = match result.solved {
        Slot::T0 => format_timestamp(&result.t0),
        Slot::T1 => format_timestamp(&result.t1),
        Slot::A0 => format_activity(result.a0),
        Slot::A1 => format_activity(result.a1),
    };
    fields.set(result.solved, solved_text);
    fields
}

fn reports(statuses: &[(Slot, FieldStatus); 4], offending: &[Slot]) -> Vec<FieldReport> {
    statuses
        .iter()
        .map(|(slot, status)| FieldReport {
            slot: *slot,
            status: *status,
            flagged: *status == FieldStatus::Invalid || offending.contains(slot),
        })
        .collect()
}

fn error_message(err: &SolveError) -> String {
    match err {
        SolveError::InsufficientInput { .. } => "Need more info".to_string(),
        SolveError::OverspecifiedInput => "Clear one value".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::DecayService;
    use crate::model::field::{FieldStatus, Slot};
    use crate::model::problem::{DecayRequest, RawFields};

    fn request(isotope: &str, t0: &str, t1: &str, a0: &str, a1: &str) -> DecayRequest {
        DecayRequest {
            isotope: isotope.to_string(),
            fields: RawFields {
                t0: t0.to_string(),
                t1: t1.to_string(),
                a0: a0.to_string(),
                a1: a1.to_string(),
            },
        }
    }

    #[test]
    fn calculate_fills_solved_slot_and_display_values() {
        let service = DecayService::builtin();
        let response = service.calculate(&request(
            "18-F",
            "01-01-2024 00:00",
            "",
            "100",
            "50",
        ));
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.solved, Some(Slot::T1));
        assert_eq!(response.fields.t1, "01-01-2024 01:49");
        assert_eq!(response.elapsed, "1:49:46");
        assert_eq!(response.ratio, "0.500");
        assert!(response.message.is_empty());
    }

    #[test]
    fn count_errors_use_short_messages() {
        let service = DecayService::builtin();
        let too_few = service.calculate(&request("18-F", "01-01-2024 00:00", "", "100", ""));
        assert_eq!(too_few.message, "Need more info");
        let too_many = service.calculate(&request(
            "18-F",
            "01-01-2024 00:00",
            "01-01-2024 01:00",
            "100",
            "50",
        ));
        assert_eq!(too_many.message, "Clear one value");
        assert!(!too_many.ok);
    }

    #[test]
    fn domain_error_flags_both_activities() {
        let service = DecayService::builtin();
        let response = service.calculate(&request("18-F", "", "01-01-2024 01:00", "50", "-5"));
        assert!(!response.ok);
        let flagged: Vec<Slot> = response
            .statuses
            .iter()
            .filter(|report| report.flagged)
            .map(|report| report.slot)
            .collect();
        assert_eq!(flagged, vec![Slot::A0, Slot::A1]);
        assert!(response
            .statuses
            .iter()
            .all(|report| report.slot.is_time() || report.status == FieldStatus::Valid));
    }

    #[test]
    fn unknown_isotope_is_reported() {
        let service = DecayService::builtin();
        let response = service.calculate(&request("14-C", "", "", "", ""));
        assert_eq!(response.message, "unknown isotope: 14-C");
    }
}

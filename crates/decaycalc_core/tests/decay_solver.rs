use decaycalc_core::{
    DecayProblem, DecayRequest, DecayService, IsotopeRegistry, RawFields, Slot, SolveError,
};

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

fn fluorine_halflife() -> f64 {
    IsotopeRegistry::builtin()
        .lookup("18-F")
        .unwrap()
        .halflife_seconds()
}

#[test]
fn fluorine_one_hour_decay() {
    let result = DecayService::builtin()
        .solve(&request("18-F", "01-01-2024 00:00", "01-01-2024 01:00", "100", ""))
        .unwrap();
    let expected = 100.0 * (-3_600.0 / fluorine_halflife()).exp2();
    assert!((result.a1 - expected).abs() < 1e-9 * expected);
    assert!((result.a1 - 68.4635).abs() < 1e-3, "a1 = {}", result.a1);
    assert_eq!(result.elapsed_seconds, 3_600.0);
    assert!((result.ratio - result.a1 / 100.0).abs() < 1e-15);
}

#[test]
fn fluorine_halving_time_lands_on_expected_minute() {
    let response = DecayService::builtin().calculate(&request(
        "18-F",
        "01-01-2024 00:00",
        "",
        "100",
        "50",
    ));
    assert!(response.ok, "{}", response.message);
    assert_eq!(response.fields.t1, "01-01-2024 01:49");
    assert_eq!(response.solved, Some(Slot::T1));
}

#[test]
fn solving_start_time_goes_backwards() {
    let result = DecayService::builtin()
        .solve(&request("18-F", "", "01-01-2024 01:49", "100", "50"))
        .unwrap();
    assert_eq!(result.solved, Slot::T0);
    assert!((result.elapsed_seconds - fluorine_halflife()).abs() < 1e-6);
}

#[test]
fn zero_elapsed_keeps_activity() {
    let result = DecayService::builtin()
        .solve(&request("68-Ge", "05-05-2020 10:00", "05-05-2020 10:00", "83.58", ""))
        .unwrap();
    assert_eq!(result.a1, 83.58);
    assert_eq!(result.ratio, 1.0);
}

#[test]
fn count_rule_boundaries() {
    let service = DecayService::builtin();
    assert_eq!(
        service
            .solve(&request("18-F", "01-01-2024 00:00", "", "100", ""))
            .unwrap_err(),
        SolveError::InsufficientInput { present: 2 }
    );
    assert_eq!(
        service
            .solve(&request("18-F", "01-01-2024 00:00", "01-01-2024 01:00", "100", "50"))
            .unwrap_err(),
        SolveError::OverspecifiedInput
    );
    assert!(service
        .solve(&request("18-F", "01-01-2024 00:00", "01-01-2024 01:00", "100", ""))
        .is_ok());
}

#[test]
fn empty_problem_needs_more_info() {
    let err = DecayService::builtin()
        .solve(&request("18-F", "", " ", "", ""))
        .unwrap_err();
    assert_eq!(err, SolveError::InsufficientInput { present: 0 });
}

#[test]
fn negative_or_zero_end_activity_has_no_start_time() {
    let service = DecayService::builtin();
    for a1 in ["-5", "0"] {
        let err = service
            .solve(&request("18-F", "", "01-01-2024 01:00", "50", a1))
            .unwrap_err();
        assert!(
            matches!(err, SolveError::NonPositiveRatio { .. }),
            "A1={a1}: {err:?}"
        );
    }
}

#[test]
fn invalid_month_is_a_parse_error_not_a_count_error() {
    let err = DecayService::builtin()
        .solve(&request("18-F", "31-13-2024 00:00", "01-01-2024 01:00", "100", ""))
        .unwrap_err();
    match &err {
        SolveError::Parse { fields } => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].slot, Slot::T0);
            assert!(fields[0].reason.contains("calendar date"), "{}", fields[0].reason);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.offending_slots(), vec![Slot::T0]);
}

#[test]
fn parse_error_wins_even_with_four_fields() {
    let err = DecayService::builtin()
        .solve(&request(
            "18-F",
            "01-01-2024 00:00",
            "01-01-2024 01:00",
            "100",
            "fifty",
        ))
        .unwrap_err();
    assert!(matches!(err, SolveError::Parse { .. }));
    assert_eq!(err.offending_slots(), vec![Slot::A1]);
}

#[test]
fn decades_of_fluorine_decay_are_not_a_result() {
    let service = DecayService::builtin();
    let overflow = service
        .solve(&request("18-F", "01-01-2000 00:00", "01-01-2024 00:00", "", "5"))
        .unwrap_err();
    assert_eq!(overflow, SolveError::ActivityOutOfRange { slot: Slot::A0 });

    let undefined = service
        .solve(&request("18-F", "01-01-2000 00:00", "01-01-2024 00:00", "", "0"))
        .unwrap_err();
    assert_eq!(undefined, SolveError::ActivityOutOfRange { slot: Slot::A0 });

    let response = service.calculate(&request(
        "18-F",
        "01-01-2000 00:00",
        "01-01-2024 00:00",
        "",
        "5",
    ));
    assert!(!response.ok);
    assert_eq!(response.fields.a0, "");
    assert!(response.ratio.is_empty());
}

#[test]
fn start_activity_underflow_is_division_by_zero() {
    let err = DecayService::builtin()
        .solve(&request("18-F", "01-01-2024 00:00", "01-01-2000 00:00", "", "5"))
        .unwrap_err();
    assert_eq!(
        err,
        SolveError::DivisionByZero {
            numerator: Slot::A1,
            denominator: Slot::A0,
        }
    );
}

#[test]
fn unknown_isotope_fails_before_solving() {
    let err = DecayService::builtin()
        .solve(&request("3-H", "01-01-2024 00:00", "01-01-2024 01:00", "100", ""))
        .unwrap_err();
    assert_eq!(err, SolveError::UnknownIsotope("3-H".to_string()));
}

#[test]
fn problem_reports_field_states_for_highlighting() {
    let isotope = IsotopeRegistry::builtin().lookup("123-I").unwrap();
    let fields = RawFields {
        t0: "1-1-2024 9:00".to_string(),
        t1: "soon".to_string(),
        a0: String::new(),
        a1: "12.5".to_string(),
    };
    let problem = DecayProblem::parse(&fields, isotope);
    let statuses: Vec<_> = problem
        .statuses()
        .iter()
        .map(|(_, status)| format!("{status:?}"))
        .collect();
    assert_eq!(statuses, vec!["Valid", "Invalid", "Absent", "Valid"]);
}

#[test]
fn result_serializes_solved_slot() {
    let result = DecayService::builtin()
        .solve(&request("166-Ho", "01-01-2024 00:00", "02-01-2024 02:48", "", "50"))
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["solved"], "a0");
    assert_eq!(json["elapsed_seconds"], 96_480.0);
    assert!((result.a0 - 100.0).abs() < 1e-9);
}

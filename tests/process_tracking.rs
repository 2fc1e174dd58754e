//! 입력 처리기 + 세션 + 공정 분류를 실제 계산기로 묶어 확인하는 시나리오 테스트.
use psychro_toolbox::psychro::AshraeSolver;
use psychro_toolbox::resolver::{InputResolver, KnownProperties, KnownProperty};
use psychro_toolbox::session::Session;
use psychro_toolbox::tracker::{classify, ProcessKind};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn with_rh(dry_bulb: f64, rh: f64) -> KnownProperties {
    KnownProperties::new()
        .with(KnownProperty::DryBulb, dry_bulb)
        .with(KnownProperty::RelativeHumidity, rh)
}

fn with_wet_bulb(dry_bulb: f64, wet_bulb: f64) -> KnownProperties {
    KnownProperties::new()
        .with(KnownProperty::DryBulb, dry_bulb)
        .with(KnownProperty::WetBulb, wet_bulb)
}

#[test]
fn first_point_keeps_placeholder() {
    let resolver = InputResolver::new(AshraeSolver);
    let mut session = Session::new();
    let calc = resolver.submit(&mut session, &with_rh(75.0, 50.0)).expect("75/50");

    assert_eq!(session.history().len(), 1);
    assert_eq!(calc.process, ProcessKind::Undetermined);
    assert_eq!(
        session.process().label(),
        "This will be changed once a second point is plotted"
    );
    let s = calc.state;
    assert_close("W", s.humidity_ratio, 0.009236, 2e-5);
    assert_close("Twb", s.wet_bulb_f, 62.55, 0.1);
    assert_close("Tdp", s.dew_point_f, 55.12, 0.1);
    assert_close("Pw", s.vapor_pressure_psi, 0.2150, 5e-4);
    assert_close("h", s.enthalpy_btu_per_lb, 28.11, 0.05);
    assert_close("v", s.specific_volume_ft3_per_lb, 13.68, 0.01);
    assert_close("mu", s.degree_of_saturation, 0.4926, 1e-3);
    assert_eq!(session.last_state(), Some(&s));
}

#[test]
fn cooler_point_at_same_rh_is_evaporative_cooling() {
    let resolver = InputResolver::new(AshraeSolver);
    let mut session = Session::new();
    resolver.submit(&mut session, &with_rh(75.0, 50.0)).expect("75/50");
    let calc = resolver.submit(&mut session, &with_rh(60.0, 50.0)).expect("60/50");

    let history = session.history();
    let dx = history[1].dry_bulb_f - history[0].dry_bulb_f;
    let dy = history[1].humidity_ratio - history[0].humidity_ratio;
    assert!(dx < 0.0 && dy < 0.0, "dx={dx} dy={dy}");
    assert_eq!(calc.process, ProcessKind::EvaporativeCooling);
    assert_eq!(session.process(), ProcessKind::EvaporativeCooling);
}

#[test]
fn heating_along_wet_bulb_line_is_chemical_dehumidifying() {
    let resolver = InputResolver::new(AshraeSolver);
    let mut session = Session::new();
    let first = resolver.submit(&mut session, &with_wet_bulb(70.0, 70.0)).expect("70/70");
    let second = resolver.submit(&mut session, &with_wet_bulb(80.0, 70.0)).expect("80/70");

    assert_close("W sat", first.state.humidity_ratio, 0.015764, 5e-5);
    assert_close("W 80/70", second.state.humidity_ratio, 0.013430, 5e-5);
    assert!(second.state.humidity_ratio < first.state.humidity_ratio);
    assert_eq!(second.process, ProcessKind::ChemicalDehumidifying);
}

#[test]
fn identical_points_classify_without_division() {
    let resolver = InputResolver::new(AshraeSolver);
    let mut session = Session::new();
    resolver.submit(&mut session, &with_rh(75.0, 50.0)).expect("first");
    let calc = resolver.submit(&mut session, &with_rh(75.0, 50.0)).expect("second");
    assert_eq!(calc.process, ProcessKind::Humidification);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn percent_and_fraction_rh_give_same_state() {
    let resolver = InputResolver::new(AshraeSolver);
    let percent = resolver.solve(&with_rh(75.0, 50.0)).expect("percent");
    let fraction = resolver.solve(&with_rh(75.0, 0.5)).expect("fraction");
    assert_eq!(percent, fraction);
}

#[test]
fn dew_point_round_trip_is_classified_from_last_two_points() {
    let resolver = InputResolver::new(AshraeSolver);
    let mut session = Session::new();
    for (t, rh) in [(60.0, 50.0), (80.0, 50.0)] {
        resolver.submit(&mut session, &with_rh(t, rh)).expect("point");
    }
    assert_eq!(session.process(), ProcessKind::HeatingAndHumidification);

    // 이슬점을 되넣으면 습도비는 반복 오차 수준으로만 달라진다
    let w = session.latest().expect("latest").humidity_ratio;
    let dew_point = session.last_state().expect("state").dew_point_f;
    let props = KnownProperties::new()
        .with(KnownProperty::DryBulb, 70.0)
        .with(KnownProperty::DewPoint, dew_point);
    let calc = resolver.submit(&mut session, &props).expect("third point");
    assert_close("W held", calc.state.humidity_ratio, w, 5e-6);

    let history = session.history();
    assert_eq!(history.len(), 3);
    assert_eq!(calc.process, classify(history[1], history[2]));
    assert_ne!(calc.process, classify(history[0], history[2]));
}

#[test]
fn rejected_state_leaves_session_untouched() {
    let resolver = InputResolver::new(AshraeSolver);
    let mut session = Session::new();
    resolver.submit(&mut session, &with_rh(75.0, 50.0)).expect("first");
    let before = session.history().to_vec();

    let err = resolver
        .submit(&mut session, &with_wet_bulb(70.0, 75.0))
        .expect_err("wet bulb above dry bulb");
    assert!(err.to_string().contains("above dry bulb"), "{err}");
    assert_eq!(session.history(), before.as_slice());
    assert_eq!(session.process(), ProcessKind::Undetermined);
}

#[test]
fn elevation_lowers_pressure_and_raises_humidity_ratio() {
    let sea = InputResolver::new(AshraeSolver);
    let high = InputResolver::at_elevation(AshraeSolver, 5000.0);
    assert!(high.pressure_psi() < sea.pressure_psi());
    let w_sea = sea.solve(&with_rh(75.0, 50.0)).expect("sea").humidity_ratio;
    let w_high = high.solve(&with_rh(75.0, 50.0)).expect("high").humidity_ratio;
    assert!(w_high > w_sea);
}

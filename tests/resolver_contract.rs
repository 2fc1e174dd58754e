//! 계산기를 가짜로 바꿔 입력 처리기가 넘기는 값과 오류 전파를 확인한다.
use std::cell::RefCell;

use psychro_toolbox::app::submit_form;
use psychro_toolbox::form::FormError;
use psychro_toolbox::psychro::{PsychroError, PsychroState, PsychrometricSolver};
use psychro_toolbox::resolver::{InputResolver, KnownProperties, KnownProperty, ResolveError};
use psychro_toolbox::session::Session;
use psychro_toolbox::tracker::ProcessKind;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Call {
    WetBulb(f64, f64),
    RelHum(f64, f64),
    DewPoint(f64, f64),
}

/// 호출 인자를 기록하고 고정된 상태를 돌려주는 계산기.
#[derive(Default)]
struct RecordingSolver {
    calls: RefCell<Vec<Call>>,
}

fn fixed_state(dry_bulb_f: f64) -> PsychroState {
    PsychroState {
        humidity_ratio: 0.01,
        dry_bulb_f,
        wet_bulb_f: 60.0,
        dew_point_f: 55.0,
        relative_humidity: 0.5,
        vapor_pressure_psi: 0.2,
        enthalpy_btu_per_lb: 28.0,
        specific_volume_ft3_per_lb: 13.7,
        degree_of_saturation: 0.49,
    }
}

impl PsychrometricSolver for RecordingSolver {
    fn standard_pressure(&self, _elevation_ft: f64) -> f64 {
        14.696
    }

    fn state_from_wet_bulb(&self, t: f64, twb: f64, _p: f64) -> Result<PsychroState, PsychroError> {
        self.calls.borrow_mut().push(Call::WetBulb(t, twb));
        Ok(fixed_state(t))
    }

    fn state_from_rel_hum(&self, t: f64, rh: f64, _p: f64) -> Result<PsychroState, PsychroError> {
        self.calls.borrow_mut().push(Call::RelHum(t, rh));
        Ok(fixed_state(t))
    }

    fn state_from_dew_point(&self, t: f64, tdp: f64, _p: f64) -> Result<PsychroState, PsychroError> {
        self.calls.borrow_mut().push(Call::DewPoint(t, tdp));
        Ok(fixed_state(t))
    }
}

/// 항상 같은 오류를 내는 계산기.
struct RejectingSolver(PsychroError);

impl PsychrometricSolver for RejectingSolver {
    fn standard_pressure(&self, _elevation_ft: f64) -> f64 {
        14.696
    }

    fn state_from_wet_bulb(&self, _t: f64, _twb: f64, _p: f64) -> Result<PsychroState, PsychroError> {
        Err(self.0.clone())
    }

    fn state_from_rel_hum(&self, _t: f64, _rh: f64, _p: f64) -> Result<PsychroState, PsychroError> {
        Err(self.0.clone())
    }

    fn state_from_dew_point(&self, _t: f64, _tdp: f64, _p: f64) -> Result<PsychroState, PsychroError> {
        Err(self.0.clone())
    }
}

fn all_four() -> KnownProperties {
    KnownProperties::new()
        .with(KnownProperty::DryBulb, 75.0)
        .with(KnownProperty::WetBulb, 62.0)
        .with(KnownProperty::RelativeHumidity, 50.0)
        .with(KnownProperty::DewPoint, 55.0)
}

#[test]
fn wet_bulb_wins_when_everything_is_supplied() {
    let resolver = InputResolver::new(RecordingSolver::default());
    let mut session = Session::new();
    resolver.submit(&mut session, &all_four()).unwrap();
    assert_eq!(*resolver.solver().calls.borrow(), vec![Call::WetBulb(75.0, 62.0)]);
}

#[test]
fn rel_hum_beats_dew_point() {
    let resolver = InputResolver::new(RecordingSolver::default());
    let props = KnownProperties::new()
        .with(KnownProperty::DryBulb, 75.0)
        .with(KnownProperty::DewPoint, 55.0)
        .with(KnownProperty::RelativeHumidity, 0.4);
    resolver.solve(&props).unwrap();
    assert_eq!(*resolver.solver().calls.borrow(), vec![Call::RelHum(75.0, 0.4)]);
}

#[test]
fn percent_rel_hum_is_passed_as_fraction() {
    let resolver = InputResolver::new(RecordingSolver::default());
    let props = KnownProperties::new()
        .with(KnownProperty::DryBulb, 80.0)
        .with(KnownProperty::RelativeHumidity, 65.0);
    resolver.solve(&props).unwrap();
    let calls = resolver.solver().calls.borrow();
    let Call::RelHum(_, rh) = calls[0] else {
        panic!("unexpected call {:?}", calls[0]);
    };
    assert!((rh - 0.65).abs() < 1e-12, "rh={rh}");
}

#[test]
fn dew_point_alone_is_used() {
    let resolver = InputResolver::new(RecordingSolver::default());
    let props = KnownProperties::new()
        .with(KnownProperty::DryBulb, 80.0)
        .with(KnownProperty::DewPoint, 55.0);
    resolver.solve(&props).unwrap();
    assert_eq!(*resolver.solver().calls.borrow(), vec![Call::DewPoint(80.0, 55.0)]);
}

#[test]
fn resolving_is_repeatable() {
    let resolver = InputResolver::new(RecordingSolver::default());
    let props = all_four();
    let a = resolver.solve(&props).unwrap();
    let b = resolver.solve(&props).unwrap();
    assert_eq!(a, b);
    assert_eq!(resolver.solver().calls.borrow().len(), 2);
}

#[test]
fn validation_failures_never_reach_the_solver() {
    let resolver = InputResolver::new(RecordingSolver::default());
    let mut session = Session::new();
    let only_dry_bulb = KnownProperties::new().with(KnownProperty::DryBulb, 75.0);
    assert_eq!(
        resolver.submit(&mut session, &only_dry_bulb).unwrap_err(),
        ResolveError::InsufficientInputs
    );
    let negative = KnownProperties::new()
        .with(KnownProperty::DryBulb, -5.0)
        .with(KnownProperty::RelativeHumidity, 50.0);
    assert!(resolver.submit(&mut session, &negative).is_err());
    assert!(resolver.solver().calls.borrow().is_empty());
    assert!(session.history().is_empty());
}

#[test]
fn solver_error_is_reported_and_session_unchanged() {
    let failure = PsychroError::WetBulbAboveDryBulb {
        dry_bulb: 70.0,
        wet_bulb: 75.0,
    };
    let resolver = InputResolver::new(RejectingSolver(failure.clone()));
    let mut session = Session::new();
    let err = resolver.submit(&mut session, &all_four()).unwrap_err();
    assert_eq!(err, ResolveError::Calculation(failure.clone()));
    assert_eq!(err.to_string(), failure.to_string());
    assert!(session.history().is_empty());
    assert!(session.last_state().is_none());
}

#[test]
fn form_shows_solver_message_verbatim() {
    let failure = PsychroError::NoConvergence("wet bulb");
    let resolver = InputResolver::new(RejectingSolver(failure.clone()));
    let mut session = Session::new();
    let err = submit_form(
        &resolver,
        &mut session,
        [(KnownProperty::DryBulb, "75"), (KnownProperty::WetBulb, "60")],
    )
    .unwrap_err();
    let tr = psychro_toolbox::i18n::Translator::new("en-us");
    assert!(matches!(err, FormError::Resolve(ResolveError::Calculation(_))));
    assert_eq!(err.message(&tr), "Convergence not reached in wet bulb calculation");
}

#[test]
fn constant_humidity_ratio_gives_sensible_labels() {
    // 고정 상태 계산기는 건구온도와 무관하게 같은 습도비를 돌려준다
    let resolver = InputResolver::new(RecordingSolver::default());
    let mut session = Session::new();
    let at = |t: f64| {
        KnownProperties::new()
            .with(KnownProperty::DryBulb, t)
            .with(KnownProperty::RelativeHumidity, 50.0)
    };
    resolver.submit(&mut session, &at(80.0)).unwrap();
    let cooler = resolver.submit(&mut session, &at(70.0)).unwrap();
    assert_eq!(cooler.process, ProcessKind::SensibleHeating);
    let warmer = resolver.submit(&mut session, &at(85.0)).unwrap();
    assert_eq!(warmer.process, ProcessKind::SensibleCooling);
    assert_eq!(session.history().len(), 3);
}

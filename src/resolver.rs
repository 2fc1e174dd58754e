//! 사용자가 입력한 기지 상태량을 검증하고 계산 경로를 골라 계산기에 넘긴다.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::psychro::{PsychroError, PsychroState, PsychrometricSolver};
use crate::session::Session;
use crate::tracker::{PlottedPoint, ProcessKind};

/// 입력 가능한 기지 상태량.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KnownProperty {
    DryBulb,
    WetBulb,
    RelativeHumidity,
    DewPoint,
}

impl KnownProperty {
    pub const ALL: [KnownProperty; 4] = [
        KnownProperty::DryBulb,
        KnownProperty::WetBulb,
        KnownProperty::RelativeHumidity,
        KnownProperty::DewPoint,
    ];
}

/// 한 번의 제출에 담긴 기지 상태량 묶음. 온도는 °F, 상대습도는 % 또는 분율.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnownProperties {
    values: BTreeMap<KnownProperty, f64>,
}

impl KnownProperties {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, property: KnownProperty, value: f64) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: KnownProperty, value: f64) {
        self.values.insert(property, value);
    }

    pub fn get(&self, property: KnownProperty) -> Option<f64> {
        self.values.get(&property).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 건구온도가 요구 조건을 만족하지 못한 이유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingDryBulb {
    #[error("Dry Bulb Temperature is a required input")]
    Absent,
    #[error("Dry Bulb Temperature must be a positive number")]
    NotPositive,
}

/// 입력 검증 또는 계산 단계의 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    MissingRequiredInput(MissingDryBulb),
    #[error("Please submit at least two variables")]
    InsufficientInputs,
    /// 계산기 오류. 원래 메시지를 그대로 유지한다.
    #[error(transparent)]
    Calculation(#[from] PsychroError),
}

impl ResolveError {
    /// 언어팩 조회 키. 계산기 오류는 원문을 그대로 보여주므로 None.
    pub fn i18n_key(&self) -> Option<&'static str> {
        match self {
            ResolveError::MissingRequiredInput(MissingDryBulb::Absent) => Some("error.dry_bulb_required"),
            ResolveError::MissingRequiredInput(MissingDryBulb::NotPositive) => Some("error.dry_bulb_positive"),
            ResolveError::InsufficientInputs => Some("error.insufficient_inputs"),
            ResolveError::Calculation(_) => None,
        }
    }
}

/// 선택된 계산 경로와 계산기에 넘길 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolvePath {
    WetBulb { dry_bulb_f: f64, wet_bulb_f: f64 },
    /// `rel_hum`은 이미 0~1 분율로 정규화된 값
    RelativeHumidity { dry_bulb_f: f64, rel_hum: f64 },
    DewPoint { dry_bulb_f: f64, dew_point_f: f64 },
}

/// 1보다 큰 상대습도는 %로 보고 분율로 바꾼다.
pub fn normalize_rel_hum(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

/// 입력을 검증하고 계산 경로를 고른다.
///
/// 보조 상태량이 여러 개면 습구온도 > 상대습도 > 이슬점 순으로 하나만 쓴다.
pub fn resolve(props: &KnownProperties) -> Result<SolvePath, ResolveError> {
    let dry_bulb_f = props
        .get(KnownProperty::DryBulb)
        .ok_or(ResolveError::MissingRequiredInput(MissingDryBulb::Absent))?;
    if dry_bulb_f.is_nan() || dry_bulb_f <= 0.0 {
        return Err(ResolveError::MissingRequiredInput(MissingDryBulb::NotPositive));
    }
    if props.len() < 2 {
        return Err(ResolveError::InsufficientInputs);
    }

    if let Some(wet_bulb_f) = props.get(KnownProperty::WetBulb) {
        Ok(SolvePath::WetBulb {
            dry_bulb_f,
            wet_bulb_f,
        })
    } else if let Some(rh) = props.get(KnownProperty::RelativeHumidity) {
        Ok(SolvePath::RelativeHumidity {
            dry_bulb_f,
            rel_hum: normalize_rel_hum(rh),
        })
    } else if let Some(dew_point_f) = props.get(KnownProperty::DewPoint) {
        Ok(SolvePath::DewPoint {
            dry_bulb_f,
            dew_point_f,
        })
    } else {
        Err(ResolveError::InsufficientInputs)
    }
}

/// 성공한 계산 한 건의 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub state: PsychroState,
    pub process: ProcessKind,
}

/// 검증 → 계산 → 이력 추가를 묶는 입력 처리기.
#[derive(Debug, Clone)]
pub struct InputResolver<S> {
    solver: S,
    pressure_psi: f64,
}

impl<S: PsychrometricSolver> InputResolver<S> {
    /// 해면(고도 0) 표준 대기압으로 계산하는 처리기.
    pub fn new(solver: S) -> Self {
        Self::at_elevation(solver, 0.0)
    }

    pub fn at_elevation(solver: S, elevation_ft: f64) -> Self {
        let pressure_psi = solver.standard_pressure(elevation_ft);
        Self {
            solver,
            pressure_psi,
        }
    }

    pub fn pressure_psi(&self) -> f64 {
        self.pressure_psi
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// 세션을 건드리지 않고 상태량만 계산한다.
    pub fn solve(&self, props: &KnownProperties) -> Result<PsychroState, ResolveError> {
        let p = self.pressure_psi;
        let state = match resolve(props)? {
            SolvePath::WetBulb {
                dry_bulb_f,
                wet_bulb_f,
            } => self.solver.state_from_wet_bulb(dry_bulb_f, wet_bulb_f, p)?,
            SolvePath::RelativeHumidity {
                dry_bulb_f,
                rel_hum,
            } => self.solver.state_from_rel_hum(dry_bulb_f, rel_hum, p)?,
            SolvePath::DewPoint {
                dry_bulb_f,
                dew_point_f,
            } => self.solver.state_from_dew_point(dry_bulb_f, dew_point_f, p)?,
        };
        Ok(state)
    }

    /// 계산에 성공하면 (건구온도, 습도비) 점을 세션 이력에 추가하고 공정을 다시 분류한다.
    /// 실패하면 세션은 그대로 두고 오류를 돌려준다. 재시도하지 않는다.
    pub fn submit(&self, session: &mut Session, props: &KnownProperties) -> Result<Calculation, ResolveError> {
        let state = match self.solve(props) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "calculation rejected");
                return Err(err);
            }
        };
        let point = PlottedPoint::new(state.dry_bulb_f, state.humidity_ratio);
        let process = session.record(state, point);
        info!(
            dry_bulb_f = point.dry_bulb_f,
            humidity_ratio = point.humidity_ratio,
            points = session.tracker().len(),
            process = %process,
            "state point plotted"
        );
        Ok(Calculation { state, process })
    }
}

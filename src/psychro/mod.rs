//! 습공기 선도(psychrometric) 계산 모듈.
//!
//! 상태량 계산은 [`PsychrometricSolver`] 트레이트 뒤에 두고, 기본 구현으로
//! ASHRAE 상관식을 IP 단위로 평가하는 [`AshraeSolver`]를 제공한다.

pub mod moist_air;
pub mod saturation;
pub mod solver;

use thiserror::Error;

pub use solver::{AshraeSolver, PsychrometricSolver};

/// 반복 계산 수렴 허용오차 [°F]
pub(crate) const TOLERANCE_F: f64 = 0.001 * 9.0 / 5.0;
/// 반복 계산 최대 횟수
pub(crate) const MAX_ITER_COUNT: u32 = 100;

/// 상태량 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PsychroError {
    #[error("Temperature {0} °F is outside range [-148, 392]")]
    TemperatureOutOfRange(f64),
    #[error("Relative humidity {0} is outside range [0, 1]")]
    RelativeHumidityOutOfRange(f64),
    #[error("Humidity ratio {0} is negative")]
    NegativeHumidityRatio(f64),
    #[error("Wet bulb temperature {wet_bulb} °F is above dry bulb temperature {dry_bulb} °F")]
    WetBulbAboveDryBulb { dry_bulb: f64, wet_bulb: f64 },
    #[error("Dew point temperature {dew_point} °F is above dry bulb temperature {dry_bulb} °F")]
    DewPointAboveDryBulb { dry_bulb: f64, dew_point: f64 },
    #[error("Partial pressure of water vapor {0} psi is outside range of validity of equations")]
    VaporPressureOutOfRange(f64),
    #[error("Convergence not reached in {0} calculation")]
    NoConvergence(&'static str),
}

/// 한 번의 계산 요청으로 얻은 습공기 상태. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsychroState {
    /// 습도비 [lb_H₂O/lb_dry-air]
    pub humidity_ratio: f64,
    /// 건구온도 [°F]
    pub dry_bulb_f: f64,
    /// 습구온도 [°F]
    pub wet_bulb_f: f64,
    /// 이슬점 [°F]
    pub dew_point_f: f64,
    /// 상대습도 [0~1 분율]
    pub relative_humidity: f64,
    /// 수증기 분압 [psi]
    pub vapor_pressure_psi: f64,
    /// 습공기 엔탈피 [Btu/lb]
    pub enthalpy_btu_per_lb: f64,
    /// 습공기 비체적 [ft³/lb]
    pub specific_volume_ft3_per_lb: f64,
    /// 포화도 [-]
    pub degree_of_saturation: f64,
}

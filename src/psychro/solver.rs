use crate::units::standard_atmosphere_psi;

use super::moist_air::{
    degree_of_saturation, dew_point_from_hum_ratio, hum_ratio_from_dew_point,
    hum_ratio_from_rel_hum, hum_ratio_from_wet_bulb, moist_air_enthalpy, moist_air_volume,
    rel_hum_from_hum_ratio, vapor_pressure_from_hum_ratio, wet_bulb_from_hum_ratio,
};
use super::{PsychroError, PsychroState};

/// 두 개의 기지 상태량으로 나머지 상태량을 구하는 계산기.
///
/// 온도는 °F, 압력은 psi, 상대습도는 0~1 분율을 받는다.
pub trait PsychrometricSolver {
    /// 고도[ft]에서의 표준 대기압[psi].
    fn standard_pressure(&self, elevation_ft: f64) -> f64;

    fn state_from_wet_bulb(
        &self,
        dry_bulb_f: f64,
        wet_bulb_f: f64,
        pressure: f64,
    ) -> Result<PsychroState, PsychroError>;

    fn state_from_rel_hum(
        &self,
        dry_bulb_f: f64,
        rel_hum: f64,
        pressure: f64,
    ) -> Result<PsychroState, PsychroError>;

    fn state_from_dew_point(
        &self,
        dry_bulb_f: f64,
        dew_point_f: f64,
        pressure: f64,
    ) -> Result<PsychroState, PsychroError>;
}

/// ASHRAE Handbook Fundamentals (2017) 상관식 기반 IP 단위 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct AshraeSolver;

impl AshraeSolver {
    /// 습도비가 정해지면 나머지 상태량은 모두 같은 경로로 계산된다.
    fn state_from_hum_ratio(
        &self,
        dry_bulb_f: f64,
        humidity_ratio: f64,
        pressure: f64,
    ) -> Result<PsychroState, PsychroError> {
        Ok(PsychroState {
            humidity_ratio,
            dry_bulb_f,
            wet_bulb_f: wet_bulb_from_hum_ratio(dry_bulb_f, humidity_ratio, pressure)?,
            dew_point_f: dew_point_from_hum_ratio(dry_bulb_f, humidity_ratio, pressure)?,
            relative_humidity: rel_hum_from_hum_ratio(dry_bulb_f, humidity_ratio, pressure)?,
            vapor_pressure_psi: vapor_pressure_from_hum_ratio(humidity_ratio, pressure)?,
            enthalpy_btu_per_lb: moist_air_enthalpy(dry_bulb_f, humidity_ratio)?,
            specific_volume_ft3_per_lb: moist_air_volume(dry_bulb_f, humidity_ratio, pressure)?,
            degree_of_saturation: degree_of_saturation(dry_bulb_f, humidity_ratio, pressure)?,
        })
    }
}

impl PsychrometricSolver for AshraeSolver {
    fn standard_pressure(&self, elevation_ft: f64) -> f64 {
        standard_atmosphere_psi(elevation_ft)
    }

    fn state_from_wet_bulb(
        &self,
        dry_bulb_f: f64,
        wet_bulb_f: f64,
        pressure: f64,
    ) -> Result<PsychroState, PsychroError> {
        let w = hum_ratio_from_wet_bulb(dry_bulb_f, wet_bulb_f, pressure)?;
        self.state_from_hum_ratio(dry_bulb_f, w, pressure)
    }

    fn state_from_rel_hum(
        &self,
        dry_bulb_f: f64,
        rel_hum: f64,
        pressure: f64,
    ) -> Result<PsychroState, PsychroError> {
        let w = hum_ratio_from_rel_hum(dry_bulb_f, rel_hum, pressure)?;
        self.state_from_hum_ratio(dry_bulb_f, w, pressure)
    }

    fn state_from_dew_point(
        &self,
        dry_bulb_f: f64,
        dew_point_f: f64,
        pressure: f64,
    ) -> Result<PsychroState, PsychroError> {
        let w = hum_ratio_from_dew_point(dry_bulb_f, dew_point_f, pressure)?;
        self.state_from_hum_ratio(dry_bulb_f, w, pressure)
    }
}

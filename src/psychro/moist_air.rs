//! 습공기 상태량 관계식 (IP 단위).
//!
//! 습도비는 lb_H₂O/lb_dry-air, 압력은 psi, 엔탈피는 Btu/lb,
//! 비체적은 ft³/lb 이다.

use crate::units::{to_rankine, SQ_IN_PER_SQ_FT};

use super::saturation::{dew_point_from_vapor_pressure, saturation_vapor_pressure};
use super::{PsychroError, MAX_ITER_COUNT, TOLERANCE_F};

/// 수증기/건공기 분자량 비
const MOLAR_MASS_RATIO: f64 = 0.621945;
/// 건공기 기체상수 [ft·lbf/lb_da/°R]
const R_DRY_AIR: f64 = 53.350;
/// 얼음/물 습구식 경계 [°F]
const FREEZING_POINT_WATER_F: f64 = 32.0;
/// 수치 안정용 최소 습도비
pub const MIN_HUM_RATIO: f64 = 1e-7;

fn bounded(hum_ratio: f64) -> f64 {
    hum_ratio.max(MIN_HUM_RATIO)
}

fn check_hum_ratio(hum_ratio: f64) -> Result<f64, PsychroError> {
    if hum_ratio < 0.0 {
        return Err(PsychroError::NegativeHumidityRatio(hum_ratio));
    }
    Ok(bounded(hum_ratio))
}

/// W = 0.621945 * Pw / (P - Pw)
pub fn hum_ratio_from_vapor_pressure(vapor_pressure: f64, pressure: f64) -> Result<f64, PsychroError> {
    if vapor_pressure < 0.0 {
        return Err(PsychroError::VaporPressureOutOfRange(vapor_pressure));
    }
    Ok(bounded(MOLAR_MASS_RATIO * vapor_pressure / (pressure - vapor_pressure)))
}

/// Pw = P * W / (0.621945 + W)
pub fn vapor_pressure_from_hum_ratio(hum_ratio: f64, pressure: f64) -> Result<f64, PsychroError> {
    let w = check_hum_ratio(hum_ratio)?;
    Ok(pressure * w / (MOLAR_MASS_RATIO + w))
}

/// 건구온도에서의 포화 습도비.
pub fn saturation_hum_ratio(dry_bulb_f: f64, pressure: f64) -> Result<f64, PsychroError> {
    let pws = saturation_vapor_pressure(dry_bulb_f)?;
    Ok(bounded(MOLAR_MASS_RATIO * pws / (pressure - pws)))
}

/// 상대습도(0~1 분율)로부터 습도비를 계산한다.
pub fn hum_ratio_from_rel_hum(dry_bulb_f: f64, rel_hum: f64, pressure: f64) -> Result<f64, PsychroError> {
    if !(0.0..=1.0).contains(&rel_hum) {
        return Err(PsychroError::RelativeHumidityOutOfRange(rel_hum));
    }
    let vapor_pressure = rel_hum * saturation_vapor_pressure(dry_bulb_f)?;
    hum_ratio_from_vapor_pressure(vapor_pressure, pressure)
}

/// 습도비로부터 상대습도(0~1 분율)를 계산한다.
pub fn rel_hum_from_hum_ratio(dry_bulb_f: f64, hum_ratio: f64, pressure: f64) -> Result<f64, PsychroError> {
    let vapor_pressure = vapor_pressure_from_hum_ratio(hum_ratio, pressure)?;
    Ok(vapor_pressure / saturation_vapor_pressure(dry_bulb_f)?)
}

/// 이슬점으로부터 습도비를 계산한다. 이슬점 온도의 포화압이 곧 분압이다.
pub fn hum_ratio_from_dew_point(dry_bulb_f: f64, dew_point_f: f64, pressure: f64) -> Result<f64, PsychroError> {
    if dew_point_f > dry_bulb_f {
        return Err(PsychroError::DewPointAboveDryBulb {
            dry_bulb: dry_bulb_f,
            dew_point: dew_point_f,
        });
    }
    hum_ratio_from_vapor_pressure(saturation_vapor_pressure(dew_point_f)?, pressure)
}

/// 습도비로부터 이슬점을 계산한다.
pub fn dew_point_from_hum_ratio(dry_bulb_f: f64, hum_ratio: f64, pressure: f64) -> Result<f64, PsychroError> {
    let vapor_pressure = vapor_pressure_from_hum_ratio(hum_ratio, pressure)?;
    dew_point_from_vapor_pressure(dry_bulb_f, vapor_pressure)
}

/// 습구온도로부터 습도비를 계산한다. ASHRAE 식 (35), 빙점 이하는 식 (37).
pub fn hum_ratio_from_wet_bulb(dry_bulb_f: f64, wet_bulb_f: f64, pressure: f64) -> Result<f64, PsychroError> {
    if wet_bulb_f > dry_bulb_f {
        return Err(PsychroError::WetBulbAboveDryBulb {
            dry_bulb: dry_bulb_f,
            wet_bulb: wet_bulb_f,
        });
    }
    let ws_star = saturation_hum_ratio(wet_bulb_f, pressure)?;
    let w = if wet_bulb_f >= FREEZING_POINT_WATER_F {
        ((1093.0 - 0.556 * wet_bulb_f) * ws_star - 0.240 * (dry_bulb_f - wet_bulb_f))
            / (1093.0 + 0.444 * dry_bulb_f - wet_bulb_f)
    } else {
        ((1220.0 - 0.04 * wet_bulb_f) * ws_star - 0.240 * (dry_bulb_f - wet_bulb_f))
            / (1220.0 + 0.444 * dry_bulb_f - 0.48 * wet_bulb_f)
    };
    Ok(bounded(w))
}

/// 습도비로부터 습구온도를 이분법으로 구한다. 탐색 구간은 [이슬점, 건구온도].
pub fn wet_bulb_from_hum_ratio(dry_bulb_f: f64, hum_ratio: f64, pressure: f64) -> Result<f64, PsychroError> {
    let w = check_hum_ratio(hum_ratio)?;
    let mut lower = dew_point_from_hum_ratio(dry_bulb_f, w, pressure)?;
    let mut upper = dry_bulb_f;
    let mut wet_bulb = (lower + upper) / 2.0;
    let mut iterations = 1;
    while upper - lower > TOLERANCE_F {
        if hum_ratio_from_wet_bulb(dry_bulb_f, wet_bulb, pressure)? > w {
            upper = wet_bulb;
        } else {
            lower = wet_bulb;
        }
        wet_bulb = (lower + upper) / 2.0;
        if iterations >= MAX_ITER_COUNT {
            return Err(PsychroError::NoConvergence("wet bulb"));
        }
        iterations += 1;
    }
    Ok(wet_bulb)
}

/// 습공기 엔탈피 [Btu/lb]: h = 0.240 t + W (1061 + 0.444 t)
pub fn moist_air_enthalpy(dry_bulb_f: f64, hum_ratio: f64) -> Result<f64, PsychroError> {
    let w = check_hum_ratio(hum_ratio)?;
    Ok(0.240 * dry_bulb_f + w * (1061.0 + 0.444 * dry_bulb_f))
}

/// 습공기 비체적 [ft³/lb_da]: v = R_da T (1 + 1.607858 W) / (144 P)
pub fn moist_air_volume(dry_bulb_f: f64, hum_ratio: f64, pressure: f64) -> Result<f64, PsychroError> {
    let w = check_hum_ratio(hum_ratio)?;
    Ok(R_DRY_AIR * to_rankine(dry_bulb_f) * (1.0 + 1.607858 * w) / (SQ_IN_PER_SQ_FT * pressure))
}

/// 포화도 = W / Ws(t)
pub fn degree_of_saturation(dry_bulb_f: f64, hum_ratio: f64, pressure: f64) -> Result<f64, PsychroError> {
    let w = check_hum_ratio(hum_ratio)?;
    Ok(w / saturation_hum_ratio(dry_bulb_f, pressure)?)
}

/// 엔탈피 등가선 작도용: 엔탈피와 건구온도에서 습도비를 역산한다.
pub fn hum_ratio_from_enthalpy(enthalpy: f64, dry_bulb_f: f64) -> f64 {
    bounded((enthalpy - 0.240 * dry_bulb_f) / (1061.0 + 0.444 * dry_bulb_f))
}

/// 비체적 등가선 작도용: 비체적과 건구온도에서 습도비를 역산한다.
///
/// 건공기만으로도 비체적을 채우지 못하는 온도에서는 음수가 나온다.
pub fn hum_ratio_from_volume(volume: f64, dry_bulb_f: f64, pressure: f64) -> f64 {
    (volume * SQ_IN_PER_SQ_FT * pressure / (R_DRY_AIR * to_rankine(dry_bulb_f)) - 1.0) / 1.607858
}

//! 포화 수증기압과 이슬점 계산.
//!
//! ASHRAE Handbook Fundamentals (2017) 1장 식 (5), (6)을 IP 단위로 사용한다.
//! 온도 인자는 모두 화씨[°F], 압력은 psi 이다.

use crate::units::to_rankine;

use super::{PsychroError, MAX_ITER_COUNT, TOLERANCE_F};

/// 얼음/물 포화식이 바뀌는 물의 삼중점 [°F]
pub const TRIPLE_POINT_WATER_F: f64 = 32.018;

/// 포화식의 유효 범위 [°F]
pub const VALID_RANGE_F: (f64, f64) = (-148.0, 392.0);

/// 건구온도에서 포화 수증기압[psi]을 계산한다.
pub fn saturation_vapor_pressure(t_f: f64) -> Result<f64, PsychroError> {
    if !(VALID_RANGE_F.0..=VALID_RANGE_F.1).contains(&t_f) {
        return Err(PsychroError::TemperatureOutOfRange(t_f));
    }
    let t = to_rankine(t_f);
    let ln_pws = if t_f <= TRIPLE_POINT_WATER_F {
        // 얼음 위 포화
        -1.0214165e4 / t - 4.8932428 - 5.3765794e-3 * t + 1.9202377e-7 * t * t
            + 3.5575832e-10 * t.powi(3)
            - 9.0344688e-14 * t.powi(4)
            + 4.1635019 * t.ln()
    } else {
        -1.0440397e4 / t - 1.1294650e1 - 2.7022355e-2 * t + 1.2890360e-5 * t * t
            - 2.4780681e-9 * t.powi(3)
            + 6.5459673 * t.ln()
    };
    Ok(ln_pws.exp())
}

/// ln(Pws)의 온도 미분. 이슬점 뉴턴-랩슨 반복에 쓴다.
fn d_ln_pws(t_f: f64) -> f64 {
    let t = to_rankine(t_f);
    if t_f <= TRIPLE_POINT_WATER_F {
        1.0214165e4 / (t * t) - 5.3765794e-3 + 2.0 * 1.9202377e-7 * t
            + 3.0 * 3.5575832e-10 * t * t
            - 4.0 * 9.0344688e-14 * t.powi(3)
            + 4.1635019 / t
    } else {
        1.0440397e4 / (t * t) - 2.7022355e-2 + 2.0 * 1.2890360e-5 * t
            - 3.0 * 2.4780681e-9 * t * t
            + 6.5459673 / t
    }
}

/// 수증기 분압[psi]에서 이슬점[°F]을 역산한다.
///
/// 결과는 건구온도를 넘지 않도록 잘라낸다.
pub fn dew_point_from_vapor_pressure(dry_bulb_f: f64, vapor_pressure: f64) -> Result<f64, PsychroError> {
    let (lower, upper) = VALID_RANGE_F;
    if vapor_pressure < saturation_vapor_pressure(lower)?
        || vapor_pressure > saturation_vapor_pressure(upper)?
    {
        return Err(PsychroError::VaporPressureOutOfRange(vapor_pressure));
    }

    let ln_vp = vapor_pressure.ln();
    let mut dew_point = dry_bulb_f.clamp(lower, upper);
    let mut iterations = 1;
    loop {
        let previous = dew_point;
        let ln_vp_iter = saturation_vapor_pressure(previous)?.ln();
        dew_point = (previous - (ln_vp_iter - ln_vp) / d_ln_pws(previous)).clamp(lower, upper);
        if (dew_point - previous).abs() <= TOLERANCE_F {
            break;
        }
        if iterations > MAX_ITER_COUNT {
            return Err(PsychroError::NoConvergence("dew point"));
        }
        iterations += 1;
    }
    Ok(dew_point.min(dry_bulb_f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn saturation_pressure_matches_ashrae_table() {
        // 68 °F 에서 약 0.339 psi, 212 °F 에서 대기압 근방
        assert_relative_eq!(saturation_vapor_pressure(68.0).unwrap(), 0.3389, max_relative = 3e-3);
        assert_relative_eq!(saturation_vapor_pressure(212.0).unwrap(), 14.70, max_relative = 3e-3);
    }

    #[test]
    fn saturation_pressure_over_ice_below_triple_point() {
        // -4 °F (-20 °C) 얼음 위 포화압 103.26 Pa = 0.01498 psi
        assert_relative_eq!(saturation_vapor_pressure(-4.0).unwrap(), 0.01498, max_relative = 5e-3);
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        assert!(matches!(
            saturation_vapor_pressure(400.0),
            Err(PsychroError::TemperatureOutOfRange(_))
        ));
    }

    #[test]
    fn dew_point_inverts_saturation_pressure() {
        let pws = saturation_vapor_pressure(55.0).unwrap();
        let dp = dew_point_from_vapor_pressure(80.0, pws).unwrap();
        assert!((dp - 55.0).abs() < 0.01, "dp={dp}");
    }

    #[test]
    fn dew_point_never_exceeds_dry_bulb() {
        let pws = saturation_vapor_pressure(70.0).unwrap();
        let dp = dew_point_from_vapor_pressure(70.0, pws).unwrap();
        assert!(dp <= 70.0);
    }
}

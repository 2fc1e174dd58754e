/// 압력(psi)과 면적(ft²) 환산에 쓰는 in²/ft² 계수.
pub const SQ_IN_PER_SQ_FT: f64 = 144.0;

/// 해면 표준 대기압 [psi]
const SEA_LEVEL_PSI: f64 = 14.696;

/// 고도[ft]에서의 표준 대기압[psi]을 계산한다.
///
/// ASHRAE Handbook Fundamentals (2017) 1장 식 (3):
/// p = 14.696 * (1 - 6.8754e-6 * Z)^5.2559
pub fn standard_atmosphere_psi(elevation_ft: f64) -> f64 {
    SEA_LEVEL_PSI * (1.0 - 6.8754e-06 * elevation_ft).powf(5.2559)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_is_one_atmosphere() {
        assert!((standard_atmosphere_psi(0.0) - 14.696).abs() < 1e-12);
    }

    #[test]
    fn pressure_drops_with_elevation() {
        // ASHRAE 표 1: 5000 ft 에서 12.228 psi
        assert!((standard_atmosphere_psi(5000.0) - 12.228).abs() < 5e-3);
    }
}

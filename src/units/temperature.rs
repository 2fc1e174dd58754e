/// 화씨 0도에 해당하는 랭킨 온도.
pub const RANKINE_OFFSET: f64 = 459.67;

/// 화씨 온도를 절대온도(랭킨)로 변환한다.
pub fn to_rankine(t_f: f64) -> f64 {
    t_f + RANKINE_OFFSET
}

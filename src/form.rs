//! 입력 폼 문자열 해석과 결과 필드 포맷팅.
//!
//! GUI와 CLI가 같은 규칙을 쓰도록 화면 계층과 분리해 둔다.

use thiserror::Error;

use crate::i18n::Translator;
use crate::psychro::PsychroState;
use crate::resolver::{KnownProperties, KnownProperty, ResolveError};

/// 입력 칸의 초기값. 이 값이 그대로 남아 있으면 입력하지 않은 것으로 본다.
pub const DEFAULT_FIELD_TEXT: &str = "0.0";

impl KnownProperty {
    pub fn label(self) -> &'static str {
        match self {
            KnownProperty::DryBulb => "Dry Bulb Temp (°F)",
            KnownProperty::WetBulb => "Wet Bulb Temp (°F)",
            KnownProperty::RelativeHumidity => "Relative Humidity (%)",
            KnownProperty::DewPoint => "Dew Point (°F)",
        }
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            KnownProperty::DryBulb => "input.dry_bulb",
            KnownProperty::WetBulb => "input.wet_bulb",
            KnownProperty::RelativeHumidity => "input.rel_hum",
            KnownProperty::DewPoint => "input.dew_point",
        }
    }
}

/// 폼 제출 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{} is not a valid number", .0.label())]
    InvalidNumber(KnownProperty),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl FormError {
    /// 오류 대화상자에 띄울 문장. 계산기 오류는 원문 그대로 쓴다.
    pub fn message(&self, tr: &Translator) -> String {
        match self {
            FormError::InvalidNumber(field) => tr
                .text("error.invalid_number", "{field} is not a valid number")
                .replace("{field}", &tr.text(field.i18n_key(), field.label())),
            FormError::Resolve(err) => match err.i18n_key() {
                Some(key) => tr.text(key, &err.to_string()),
                None => err.to_string(),
            },
        }
    }
}

fn is_unset(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t == DEFAULT_FIELD_TEXT
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 네 입력 칸의 문자열을 기지 상태량 묶음으로 바꾼다.
///
/// 빈 칸이나 초기값 "0.0"은 입력하지 않은 것으로 본다. 건구온도가 숫자가 아니면
/// 빠진 것으로 취급해 "필수 입력" 오류로 이어지게 하고, 다른 칸이 숫자가 아니면
/// [`FormError::InvalidNumber`]를 돌려준다.
pub fn parse_fields<'a, I>(fields: I) -> Result<KnownProperties, FormError>
where
    I: IntoIterator<Item = (KnownProperty, &'a str)>,
{
    let mut props = KnownProperties::new();
    for (property, text) in fields {
        if is_unset(text) {
            continue;
        }
        match (property, parse_finite(text)) {
            (_, Some(value)) => props.insert(property, value),
            (KnownProperty::DryBulb, None) => {}
            (other, None) => return Err(FormError::InvalidNumber(other)),
        }
    }
    Ok(props)
}

/// 결과 표시 칸. 선언 순서가 화면 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField {
    HumidityRatio,
    DewPoint,
    RelativeHumidity,
    VaporPressure,
    Enthalpy,
    SpecificVolume,
    DegreeOfSaturation,
}

impl OutputField {
    pub const ALL: [OutputField; 7] = [
        OutputField::HumidityRatio,
        OutputField::DewPoint,
        OutputField::RelativeHumidity,
        OutputField::VaporPressure,
        OutputField::Enthalpy,
        OutputField::SpecificVolume,
        OutputField::DegreeOfSaturation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OutputField::HumidityRatio => "Humidity ratio (lb_H₂O/lb_Air)",
            OutputField::DewPoint => "Dew-Point (°F)",
            OutputField::RelativeHumidity => "Relative Humidity (%)",
            OutputField::VaporPressure => "Partial pressure of water vapor in moist air (Psi)",
            OutputField::Enthalpy => "Moist air enthalpy (Btu/lb)",
            OutputField::SpecificVolume => "Specific volume of moist air (ft³/lb)",
            OutputField::DegreeOfSaturation => "Degree of saturation (unitless)",
        }
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            OutputField::HumidityRatio => "output.humidity_ratio",
            OutputField::DewPoint => "output.dew_point",
            OutputField::RelativeHumidity => "output.rel_hum",
            OutputField::VaporPressure => "output.vapor_pressure",
            OutputField::Enthalpy => "output.enthalpy",
            OutputField::SpecificVolume => "output.volume",
            OutputField::DegreeOfSaturation => "output.saturation",
        }
    }

    /// 소수점 자릿수.
    pub fn precision(self) -> usize {
        match self {
            OutputField::HumidityRatio => 3,
            OutputField::DewPoint => 1,
            OutputField::RelativeHumidity => 2,
            OutputField::VaporPressure => 3,
            OutputField::Enthalpy => 1,
            OutputField::SpecificVolume => 1,
            OutputField::DegreeOfSaturation => 2,
        }
    }

    /// 표시 단위 기준의 값. 상대습도는 %로 보여준다.
    pub fn value(self, state: &PsychroState) -> f64 {
        match self {
            OutputField::HumidityRatio => state.humidity_ratio,
            OutputField::DewPoint => state.dew_point_f,
            OutputField::RelativeHumidity => state.relative_humidity * 100.0,
            OutputField::VaporPressure => state.vapor_pressure_psi,
            OutputField::Enthalpy => state.enthalpy_btu_per_lb,
            OutputField::SpecificVolume => state.specific_volume_ft3_per_lb,
            OutputField::DegreeOfSaturation => state.degree_of_saturation,
        }
    }

    pub fn format(self, state: &PsychroState) -> String {
        format!("{:.*}", self.precision(), self.value(state))
    }
}

/// 첫 계산 전의 결과 칸. 입력 칸과 같은 초기값을 보여준다.
pub fn initial_outputs() -> [(OutputField, String); 7] {
    OutputField::ALL.map(|field| (field, DEFAULT_FIELD_TEXT.to_string()))
}

/// 일곱 개 결과 칸을 화면 순서대로 포맷한다.
pub fn format_outputs(state: &PsychroState) -> [(OutputField, String); 7] {
    OutputField::ALL.map(|field| (field, field.format(state)))
}

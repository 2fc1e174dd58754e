//! 선도에 찍힌 상태점 이력과 최근 구간의 공정 분류.

use tracing::debug;

/// 선도 위의 한 점. x = 건구온도[°F], y = 습도비.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlottedPoint {
    pub dry_bulb_f: f64,
    pub humidity_ratio: f64,
}

impl PlottedPoint {
    pub fn new(dry_bulb_f: f64, humidity_ratio: f64) -> Self {
        Self {
            dry_bulb_f,
            humidity_ratio,
        }
    }

    /// egui_plot 등에 넘기기 위한 [x, y] 배열.
    pub fn as_xy(&self) -> [f64; 2] {
        [self.dry_bulb_f, self.humidity_ratio]
    }
}

/// 마지막 두 점이 이루는 공정의 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessKind {
    /// 점이 두 개 이상 모이기 전의 자리표시 값
    #[default]
    Undetermined,
    SensibleCooling,
    SensibleHeating,
    HeatingAndHumidification,
    EvaporativeCooling,
    ChemicalDehumidifying,
    CoolingAndDehumidification,
    Dehumidification,
    Humidification,
}

impl ProcessKind {
    /// 언어팩 조회 키.
    pub fn i18n_key(self) -> &'static str {
        match self {
            ProcessKind::Undetermined => "process.undetermined",
            ProcessKind::SensibleCooling => "process.sensible_cooling",
            ProcessKind::SensibleHeating => "process.sensible_heating",
            ProcessKind::HeatingAndHumidification => "process.heating_and_humidification",
            ProcessKind::EvaporativeCooling => "process.evaporative_cooling",
            ProcessKind::ChemicalDehumidifying => "process.chemical_dehumidifying",
            ProcessKind::CoolingAndDehumidification => "process.cooling_and_dehumidification",
            ProcessKind::Dehumidification => "process.dehumidification",
            ProcessKind::Humidification => "process.humidification",
        }
    }

    /// 기본(영문) 표시 문자열.
    pub fn label(self) -> &'static str {
        match self {
            ProcessKind::Undetermined => "This will be changed once a second point is plotted",
            ProcessKind::SensibleCooling => "Sensible Cooling",
            ProcessKind::SensibleHeating => "Sensible Heating",
            ProcessKind::HeatingAndHumidification => "Heating and Humidification",
            ProcessKind::EvaporativeCooling => "Evaporative Cooling",
            ProcessKind::ChemicalDehumidifying => "Chemical Dehumidifying",
            ProcessKind::CoolingAndDehumidification => "Cooling and Dehumidification",
            ProcessKind::Dehumidification => "Dehumidification",
            ProcessKind::Humidification => "Humidification",
        }
    }
}

impl std::fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 두 점 사이 구간을 분류한다. 같은 입력이면 항상 같은 결과를 낸다.
///
/// Δx == 0 이면 기울기를 계산하지 않고 Δy 부호로만 판단한다.
/// Δx == 0, Δy == 0 (같은 점을 두 번 찍은 경우)은 Humidification 으로 떨어진다.
pub fn classify(previous: PlottedPoint, last: PlottedPoint) -> ProcessKind {
    let delta_x = last.dry_bulb_f - previous.dry_bulb_f;
    let delta_y = last.humidity_ratio - previous.humidity_ratio;

    if delta_x == 0.0 {
        return if delta_y > 0.0 {
            ProcessKind::Dehumidification
        } else {
            ProcessKind::Humidification
        };
    }

    let slope = delta_y / delta_x;
    let moves_right = delta_x > 0.0;
    if slope == 0.0 {
        if moves_right {
            ProcessKind::SensibleCooling
        } else {
            ProcessKind::SensibleHeating
        }
    } else if slope > 0.0 {
        if moves_right {
            ProcessKind::HeatingAndHumidification
        } else {
            ProcessKind::EvaporativeCooling
        }
    } else if moves_right {
        ProcessKind::ChemicalDehumidifying
    } else {
        ProcessKind::CoolingAndDehumidification
    }
}

/// 세션 동안 누적되는 상태점 이력과 현재 공정 분류.
///
/// 점은 추가만 되며 삭제/수정되지 않는다.
#[derive(Debug, Clone, Default)]
pub struct ProcessTracker {
    history: Vec<PlottedPoint>,
    process: ProcessKind,
}

impl ProcessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 점을 추가하고, 이력이 두 개 이상이면 최근 구간을 다시 분류한다.
    pub fn push(&mut self, point: PlottedPoint) -> ProcessKind {
        self.history.push(point);
        if let [.., previous, last] = self.history.as_slice() {
            self.process = classify(*previous, *last);
            debug!(
                points = self.history.len(),
                process = %self.process,
                "process reclassified"
            );
        }
        self.process
    }

    pub fn process(&self) -> ProcessKind {
        self.process
    }

    pub fn history(&self) -> &[PlottedPoint] {
        &self.history
    }

    pub fn latest(&self) -> Option<PlottedPoint> {
        self.history.last().copied()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

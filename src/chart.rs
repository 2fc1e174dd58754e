//! 습공기 선도의 기준 곡선군과 렌더러 인터페이스.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::psychro::moist_air::{
    hum_ratio_from_enthalpy, hum_ratio_from_rel_hum, hum_ratio_from_volume,
    hum_ratio_from_wet_bulb, rel_hum_from_hum_ratio, MIN_HUM_RATIO,
};
use crate::tracker::PlottedPoint;

/// 선도 작도 범위와 곡선 간격 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// 곡선 계산용 건구온도 스윕 [°F] (끝값 미포함)
    pub sweep_start_f: f64,
    pub sweep_end_f: f64,
    pub sweep_step_f: f64,
    /// 화면에 보이는 축 범위
    pub x_min_f: f64,
    pub x_max_f: f64,
    pub y_max: f64,
    /// 비체적 등가선 표시 여부
    pub show_volume_lines: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            sweep_start_f: 0.0,
            sweep_end_f: 140.0,
            sweep_step_f: 1.0,
            x_min_f: 20.0,
            x_max_f: 120.0,
            y_max: 0.03,
            show_volume_lines: true,
        }
    }
}

/// 기준 곡선 하나. `value`는 곡선이 고정하는 상태량 값이다.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub value: f64,
    pub points: Vec<[f64; 2]>,
}

/// 상대습도/습구온도/엔탈피/비체적 등가선 묶음. 한 번 계산해 두고 재사용한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCurves {
    pub rel_hum: Vec<Curve>,
    pub wet_bulb: Vec<Curve>,
    pub enthalpy: Vec<Curve>,
    pub volume: Vec<Curve>,
}

/// 한 곡선에 허용하는 최대 표본 수
pub const MAX_SWEEP_SAMPLES: usize = 10_000;

/// start 부터 step 간격으로 end 직전까지의 값 목록. 표본이 너무 많으면 빈 목록.
fn steps(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !(start.is_finite() && end.is_finite() && step.is_finite()) || step <= 0.0 || end <= start {
        return Vec::new();
    }
    let count = ((end - start) / step).ceil();
    if count > MAX_SWEEP_SAMPLES as f64 {
        return Vec::new();
    }
    (0..count as usize).map(|i| start + step * i as f64).collect()
}

impl ChartConfig {
    /// 스윕 범위와 축 범위를 검사한다. 설정 파일을 읽을 때 호출된다.
    pub fn validate(&self) -> Result<(), String> {
        let sweep = [self.sweep_start_f, self.sweep_end_f, self.sweep_step_f];
        if sweep.iter().any(|v| !v.is_finite()) || self.sweep_step_f <= 0.0 {
            return Err(format!("chart.sweep_step_f must be a positive number, got {}", self.sweep_step_f));
        }
        if self.sweep_end_f <= self.sweep_start_f {
            return Err("chart.sweep_end_f must be greater than chart.sweep_start_f".to_string());
        }
        let samples = (self.sweep_end_f - self.sweep_start_f) / self.sweep_step_f;
        if samples > MAX_SWEEP_SAMPLES as f64 {
            return Err(format!(
                "chart sweep asks for {samples:.0} samples per curve (max {MAX_SWEEP_SAMPLES})"
            ));
        }
        let axes = [self.x_min_f, self.x_max_f, self.y_max];
        if axes.iter().any(|v| !v.is_finite()) || self.x_max_f <= self.x_min_f || self.y_max <= 0.0 {
            return Err("chart axis range is empty".to_string());
        }
        Ok(())
    }
}

impl ReferenceCurves {
    /// 건구온도를 스윕하며 곡선군을 계산한다. 계산기가 거부한 표본은 건너뛴다.
    pub fn compute(config: &ChartConfig, pressure: f64) -> Self {
        let temps = steps(config.sweep_start_f, config.sweep_end_f, config.sweep_step_f);
        let saturated = |t: f64, w: f64| {
            rel_hum_from_hum_ratio(t, w, pressure)
                .map(|rh| rh <= 1.0)
                .unwrap_or(false)
        };

        let rel_hum = (0..=10)
            .map(|i| f64::from(i) / 10.0)
            .map(|rh| Curve {
                value: rh,
                points: temps
                    .iter()
                    .filter_map(|&t| hum_ratio_from_rel_hum(t, rh, pressure).ok().map(|w| [t, w]))
                    .collect(),
            })
            .collect();

        let wet_bulb = steps(0.0, 100.0, 5.0)
            .into_iter()
            .map(|twb| Curve {
                value: twb,
                points: temps
                    .iter()
                    .filter(|&&t| twb <= t)
                    .filter_map(|&t| hum_ratio_from_wet_bulb(t, twb, pressure).ok().map(|w| [t, w]))
                    .collect(),
            })
            .collect();

        let enthalpy = steps(10.0, 65.0, 1.0)
            .into_iter()
            .map(|h| Curve {
                value: h,
                points: temps
                    .iter()
                    .map(|&t| [t, hum_ratio_from_enthalpy(h, t)])
                    .filter(|&[t, w]| w > MIN_HUM_RATIO && saturated(t, w))
                    .collect(),
            })
            .collect();

        let volume = if config.show_volume_lines {
            steps(11.0, 16.0, 0.5)
                .into_iter()
                .map(|v| Curve {
                    value: v,
                    points: temps
                        .iter()
                        .map(|&t| [t, hum_ratio_from_volume(v, t, pressure)])
                        .filter(|&[t, w]| w >= 0.0 && saturated(t, w))
                        .collect(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let curves = Self {
            rel_hum,
            wet_bulb,
            enthalpy,
            volume,
        };
        debug!(
            rel_hum = curves.rel_hum.len(),
            wet_bulb = curves.wet_bulb.len(),
            enthalpy = curves.enthalpy.len(),
            volume = curves.volume.len(),
            "reference curves computed"
        );
        curves
    }
}

/// 기준 곡선과 상태점 이력을 그리는 렌더러.
///
/// 호출될 때마다 전체를 다시 그린다. `latest`는 강조 표시할 최근 점이다.
pub trait ChartRenderer {
    type Error;

    fn render(
        &mut self,
        curves: &ReferenceCurves,
        history: &[PlottedPoint],
        latest: Option<PlottedPoint>,
    ) -> Result<(), Self::Error>;
}

/// 터미널용 렌더러. 곡선은 개수만, 이력은 표로 출력한다.
pub struct TextChartRenderer<W> {
    out: W,
}

impl<W: Write> TextChartRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TextChartRenderer<W> {
    type Error = io::Error;

    fn render(
        &mut self,
        curves: &ReferenceCurves,
        history: &[PlottedPoint],
        latest: Option<PlottedPoint>,
    ) -> Result<(), Self::Error> {
        writeln!(
            self.out,
            "-- Psychrometric Chart ({} RH / {} WB / {} h / {} v lines) --",
            curves.rel_hum.len(),
            curves.wet_bulb.len(),
            curves.enthalpy.len(),
            curves.volume.len()
        )?;
        writeln!(self.out, "{:>4}  {:>10}  {:>10}", "#", "Tdb (°F)", "W")?;
        for (i, p) in history.iter().enumerate() {
            let marker = if Some(*p) == latest && i + 1 == history.len() {
                " <"
            } else {
                ""
            };
            writeln!(
                self.out,
                "{:>4}  {:>10.1}  {:>10.4}{marker}",
                i + 1,
                p.dry_bulb_f,
                p.humidity_ratio
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_ranges_exclude_end() {
        assert_eq!(steps(0.0, 100.0, 5.0).len(), 20);
        assert_eq!(steps(11.0, 16.0, 0.5).last().copied(), Some(15.5));
        assert!(steps(5.0, 5.0, 1.0).is_empty());
    }

    #[test]
    fn oversized_sweep_yields_no_samples() {
        assert!(steps(0.0, 140.0, 1e-9).is_empty());
        assert!(steps(0.0, f64::INFINITY, 1.0).is_empty());
        assert!(steps(0.0, 140.0, f64::NAN).is_empty());
        assert_eq!(steps(0.0, 10_000.0, 1.0).len(), MAX_SWEEP_SAMPLES);
    }

    #[test]
    fn tiny_sweep_step_is_rejected() {
        assert!(ChartConfig::default().validate().is_ok());
        let cfg = ChartConfig {
            sweep_step_f: 1e-9,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = ChartConfig {
            sweep_step_f: 0.0,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn families_have_expected_counts() {
        let curves = ReferenceCurves::compute(&ChartConfig::default(), 14.696);
        assert_eq!(curves.rel_hum.len(), 11);
        assert_eq!(curves.wet_bulb.len(), 20);
        assert_eq!(curves.enthalpy.len(), 55);
        assert_eq!(curves.volume.len(), 10);
        assert_eq!(curves.rel_hum[0].points.len(), 140);
    }

    #[test]
    fn wet_bulb_curves_start_at_their_own_temperature() {
        let curves = ReferenceCurves::compute(&ChartConfig::default(), 14.696);
        let c = curves.wet_bulb.iter().find(|c| c.value == 50.0).unwrap();
        assert_eq!(c.points.first().map(|p| p[0]), Some(50.0));
    }

    #[test]
    fn enthalpy_curves_stay_inside_saturation() {
        let p = 14.696;
        let curves = ReferenceCurves::compute(&ChartConfig::default(), p);
        for curve in &curves.enthalpy {
            for &[t, w] in &curve.points {
                assert!(rel_hum_from_hum_ratio(t, w, p).unwrap() <= 1.0);
            }
        }
    }

    #[test]
    fn volume_lines_can_be_disabled() {
        let cfg = ChartConfig {
            show_volume_lines: false,
            ..ChartConfig::default()
        };
        assert!(ReferenceCurves::compute(&cfg, 14.696).volume.is_empty());
    }

    #[test]
    fn text_renderer_marks_latest_point() {
        let history = [PlottedPoint::new(75.0, 0.0092), PlottedPoint::new(60.0, 0.0055)];
        let mut r = TextChartRenderer::new(Vec::new());
        r.render(&ReferenceCurves::default(), &history, history.last().copied())
            .unwrap();
        let text = String::from_utf8(r.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[3].ends_with(" <"));
        assert!(!lines[2].ends_with(" <"));
    }
}

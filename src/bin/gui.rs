#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::cell::Cell;
use std::convert::Infallible;
use std::{env, fs, path::Path};

use eframe::{egui, App, Frame};
use egui_plot::{HPlacement, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoints, Points};
use image::GenericImageView;
use psychro_toolbox::{
    app,
    chart::{ChartConfig, ChartRenderer, Curve, ReferenceCurves},
    config,
    form::{self, OutputField, DEFAULT_FIELD_TEXT},
    i18n, logging,
    psychro::AshraeSolver,
    resolver::{InputResolver, KnownProperty},
    session::Session,
    tracker::PlottedPoint,
};
use rfd::FileDialog;
use tracing::{info, warn};

fn main() -> Result<(), eframe::Error> {
    // CLI 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko), --verbose
    let mut cli_lang: Option<String> = None;
    let mut verbose = false;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        } else if a == "--verbose" || a == "-v" {
            verbose = true;
        }
        i += 1;
    }
    logging::init_logger(logging::gui_filter(verbose));

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([620.0, 720.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Psychrometric Data Compiler",
        options,
        Box::new(move |cc| {
            let font_result = match app_cfg.font_path.as_deref() {
                Some(path) => load_custom_font(&cc.egui_ctx, path),
                None => setup_fonts(&cc.egui_ctx),
            };
            if let Err(e) = font_result {
                warn!(error = %e, "font setup failed");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["psychro.png", "icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글과 아래첨자(₂, ³)를 표시할 수 있는 시스템 폰트를 찾아 적용한다.
/// 1) assets/fonts/ 아래 폰트
/// 2) Windows 시스템 폰트(맑은 고딕/굴림)
/// 3) 리눅스 Noto CJK / 나눔고딕
/// 모두 실패하면 Err를 반환해 설정에서 사용자 폰트를 고르도록 한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
        Path::new("assets/fonts/NanumGothic.ttf").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        ]
        .iter()
        .map(|p| Path::new(p).to_path_buf()),
    );

    let found = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Font not found. Please set a user font (.ttf/.ttc) in settings.".to_string())?;
    let bytes = fs::read(found)
        .map_err(|e| format!("Failed to read system font ({}): {e}", found.display()))?;
    apply_font_bytes(ctx, bytes, "system_font");
    info!(path = %found.display(), "font loaded");
    Ok(())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

/// 선도 범례/축 이름. 언어팩에서 한 번 꺼내 둔다.
struct ChartLabels {
    x_axis: String,
    y_axis: String,
    rel_hum: String,
    wet_bulb: String,
    enthalpy: String,
    volume: String,
    history: String,
    latest: String,
}

impl ChartLabels {
    fn new(tr: &i18n::Translator) -> Self {
        Self {
            x_axis: tr.text("chart.x_label", "Dry-bulb Temperature [°F]"),
            y_axis: tr.text("chart.y_label", "Humidity Ratio [lb_water/lb_dry air]"),
            rel_hum: tr.text("chart.rel_hum", "Relative humidity"),
            wet_bulb: tr.text("chart.wet_bulb", "Wet bulb"),
            enthalpy: tr.text("chart.enthalpy", "Enthalpy"),
            volume: tr.text("chart.volume", "Specific volume"),
            history: tr.text("chart.history", "Plotted points"),
            latest: tr.text("chart.latest", "Latest point"),
        }
    }
}

/// egui_plot 위에 선도를 그리는 렌더러. 매 프레임 새로 만들어 쓴다.
struct EguiChartRenderer<'a> {
    ui: &'a mut egui::Ui,
    labels: &'a ChartLabels,
    bounds: PlotBounds,
}

impl<'a> EguiChartRenderer<'a> {
    fn new(ui: &'a mut egui::Ui, labels: &'a ChartLabels, config: &ChartConfig) -> Self {
        Self {
            ui,
            labels,
            bounds: PlotBounds::from_min_max([config.x_min_f, 0.0], [config.x_max_f, config.y_max]),
        }
    }
}

fn curve_lines<'c>(
    curves: &'c [Curve],
    name: &'c str,
    color: egui::Color32,
    style: LineStyle,
) -> impl Iterator<Item = Line> + 'c {
    curves.iter().filter(|c| c.points.len() > 1).map(move |c| {
        Line::new(PlotPoints::from(c.points.clone()))
            .name(name)
            .color(color)
            .style(style)
            .width(1.0)
    })
}

impl ChartRenderer for EguiChartRenderer<'_> {
    type Error = Infallible;

    fn render(
        &mut self,
        curves: &ReferenceCurves,
        history: &[PlottedPoint],
        latest: Option<PlottedPoint>,
    ) -> Result<(), Self::Error> {
        let labels = self.labels;
        let bounds = self.bounds;
        let trail: Vec<[f64; 2]> = history.iter().map(PlottedPoint::as_xy).collect();
        Plot::new("psychro_chart")
            .legend(Legend::default())
            .x_axis_label(labels.x_axis.as_str())
            .y_axis_label(labels.y_axis.as_str())
            .y_axis_position(HPlacement::Right)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show(self.ui, |plot_ui| {
                plot_ui.set_plot_bounds(bounds);
                let families = [
                    (&curves.rel_hum, &labels.rel_hum, egui::Color32::BLACK, LineStyle::Solid),
                    (&curves.wet_bulb, &labels.wet_bulb, egui::Color32::DARK_GRAY, LineStyle::dotted_dense()),
                    (&curves.enthalpy, &labels.enthalpy, egui::Color32::from_rgb(0, 128, 96), LineStyle::dashed_loose()),
                    (&curves.volume, &labels.volume, egui::Color32::from_rgb(160, 96, 0), LineStyle::dashed_dense()),
                ];
                for (family, name, color, style) in families {
                    for line in curve_lines(family, name, color, style) {
                        plot_ui.line(line);
                    }
                }

                if trail.len() > 1 {
                    plot_ui.line(
                        Line::new(PlotPoints::from(trail.clone()))
                            .name(&labels.history)
                            .color(egui::Color32::BLUE)
                            .width(2.0),
                    );
                }
                if !trail.is_empty() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(trail))
                            .name(&labels.history)
                            .color(egui::Color32::BLUE)
                            .radius(3.0),
                    );
                }
                if let Some(p) = latest {
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![p.as_xy()]))
                            .name(&labels.latest)
                            .color(egui::Color32::RED)
                            .radius(5.0),
                    );
                }
            });
        Ok(())
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    resolver: InputResolver<AshraeSolver>,
    session: Session,
    curves: ReferenceCurves,
    chart_labels: ChartLabels,
    inputs: [(KnownProperty, String); 4],
    outputs: [(OutputField, String); 7],
    error: Option<String>,
    show_chart: bool,
    show_settings_modal: bool,
    lang_input: String,
    lang_pack_dir_input: String,
    font_path_input: String,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let resolver = InputResolver::at_elevation(AshraeSolver, config.elevation_ft);
        let curves = ReferenceCurves::compute(&config.chart, resolver.pressure_psi());
        info!(lang = %lang_code, pressure_psi = resolver.pressure_psi(), "gui session started");
        Self {
            chart_labels: ChartLabels::new(&tr),
            lang_input: config.language.clone(),
            lang_pack_dir_input: config.language_pack_dir.clone().unwrap_or_default(),
            font_path_input: config.font_path.clone().unwrap_or_default(),
            config,
            tr,
            resolver,
            session: Session::new(),
            curves,
            inputs: KnownProperty::ALL.map(|p| (p, DEFAULT_FIELD_TEXT.to_string())),
            outputs: form::initial_outputs(),
            error: None,
            show_chart: false,
            show_settings_modal: false,
            settings_status: None,
        }
    }

    /// Calculate 버튼. 실패하면 오류 대화상자를 띄우고 세션은 그대로 둔다.
    fn calculate(&mut self) {
        let fields = self.inputs.iter().map(|(k, s)| (*k, s.as_str()));
        match app::submit_form(&self.resolver, &mut self.session, fields) {
            Ok(calc) => {
                self.outputs = form::format_outputs(&calc.state);
                for (_, text) in self.inputs.iter_mut() {
                    *text = DEFAULT_FIELD_TEXT.to_string();
                }
                self.show_chart = true;
            }
            Err(err) => self.error = Some(err.message(&self.tr)),
        }
    }

    fn apply_settings(&mut self, ctx: &egui::Context) {
        let pack_dir = self.lang_pack_dir_input.trim();
        let font_path = self.font_path_input.trim();
        self.config.language = self.lang_input.clone();
        self.config.language_pack_dir = (!pack_dir.is_empty()).then(|| pack_dir.to_string());
        self.config.font_path = (!font_path.is_empty()).then(|| font_path.to_string());

        let lang_code = i18n::resolve_language("auto", Some(self.config.language.as_str()));
        self.tr = i18n::Translator::new_with_pack(&lang_code, self.config.language_pack_dir.as_deref());
        self.chart_labels = ChartLabels::new(&self.tr);
        self.curves = ReferenceCurves::compute(&self.config.chart, self.resolver.pressure_psi());
        if let Some(path) = self.config.font_path.as_deref() {
            if let Err(e) = load_custom_font(ctx, path) {
                warn!(error = %e, "custom font rejected");
            }
        }

        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.text("gui.settings_saved", "Saved."),
            Err(e) => {
                warn!(error = %e, "config save failed");
                e.to_string()
            }
        });
    }

    fn ui_form(&mut self, ui: &mut egui::Ui, txt: &impl Fn(&str, &str) -> String) {
        ui.group(|ui| {
            ui.strong(txt("gui.frame_instructions", "Instructions"));
            ui.label(txt(
                "gui.instructions",
                "Input values for dry bulb temp and at least one other variable below",
            ));
        });

        ui.add_space(6.0);
        ui.group(|ui| {
            ui.strong(txt("gui.frame_input", "Input"));
            egui::Grid::new("input_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for (property, text) in self.inputs.iter_mut() {
                        ui.label(txt(property.i18n_key(), property.label()));
                        ui.add(egui::TextEdit::singleline(text).desired_width(120.0));
                        ui.end_row();
                    }
                });
        });

        ui.add_space(6.0);
        ui.group(|ui| {
            ui.strong(txt("gui.frame_output", "Output"));
            egui::Grid::new("output_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    for (field, value) in &self.outputs {
                        let mut shown = value.as_str();
                        ui.label(txt(field.i18n_key(), field.label()));
                        ui.add(egui::TextEdit::singleline(&mut shown).desired_width(120.0));
                        ui.end_row();
                    }
                });
        });

        ui.add_space(6.0);
        ui.group(|ui| {
            ui.strong(txt("gui.frame_process", "Process"));
            let process = self.session.process();
            ui.label(txt(process.i18n_key(), process.label()));
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button(txt("gui.calculate", "Calculate")).clicked() {
                self.calculate();
            }
            if ui.button(txt("gui.close", "Close")).clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
            ui.separator();
            let has_points = !self.session.history().is_empty();
            if ui
                .add_enabled(has_points, egui::Button::new(txt("gui.show_chart", "Show chart")))
                .clicked()
            {
                self.show_chart = true;
            }
        });
    }

    fn ui_settings(&mut self, ctx: &egui::Context, txt: &impl Fn(&str, &str) -> String) {
        let mut open = self.show_settings_modal;
        let mut save_clicked = false;
        egui::Window::new(txt("gui.settings_title", "Settings"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(txt("gui.settings_lang", "Language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), txt("gui.settings_lang_auto", "System"));
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });

                ui.separator();
                ui.label(txt("gui.settings_lang_pack", "Language pack folder"));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.lang_pack_dir_input);
                    if ui.button(txt("gui.settings_browse", "Browse...")).clicked() {
                        if let Some(dir) = FileDialog::new().pick_folder() {
                            self.lang_pack_dir_input = dir.display().to_string();
                        }
                    }
                });

                ui.label(txt("gui.settings_font", "Custom font (.ttf/.ttc)"));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.font_path_input);
                    if ui.button(txt("gui.settings_browse", "Browse...")).clicked() {
                        if let Some(file) = FileDialog::new().add_filter("font", &["ttf", "ttc", "otf"]).pick_file() {
                            self.font_path_input = file.display().to_string();
                        }
                    }
                });

                ui.separator();
                ui.checkbox(
                    &mut self.config.chart.show_volume_lines,
                    txt("gui.settings_volume_lines", "Show specific volume lines"),
                );

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(txt("gui.settings_save", "Save settings")).clicked() {
                        save_clicked = true;
                    }
                    if let Some(status) = &self.settings_status {
                        ui.label(status);
                    }
                });
            });
        self.show_settings_modal = open;
        if save_clicked {
            self.apply_settings(ctx);
        }
    }

    fn ui_error(&mut self, ctx: &egui::Context, txt: &impl Fn(&str, &str) -> String) {
        let Some(message) = self.error.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(txt("gui.error_title", "Error"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button(txt("gui.ok", "OK")).clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.error = None;
        }
    }

    fn ui_chart_viewport(&mut self, ctx: &egui::Context, txt: &impl Fn(&str, &str) -> String) {
        let close_flag = Cell::new(false);
        let title = txt("chart.title", "Psychrometric Chart");
        let close_label = txt("chart.close", "Close chart");
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("psychro_chart_detached"),
            egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size(egui::vec2(900.0, 620.0)),
            |ctx, _class| {
                if ctx.input(|i| i.viewport().close_requested()) {
                    close_flag.set(true);
                }
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button(&close_label).clicked() {
                            close_flag.set(true);
                        }
                    });
                    ui.separator();
                    let mut renderer = EguiChartRenderer::new(ui, &self.chart_labels, &self.config.chart);
                    if let Err(never) = renderer.render(&self.curves, self.session.history(), self.session.latest()) {
                        match never {}
                    }
                });
            },
        );
        if close_flag.get() {
            self.show_chart = false;
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| tr.text(key, default);

        if self.show_chart {
            self.ui_chart_viewport(ctx, &txt);
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("general.app_title", "Psychrometric Data Compiler"));
                ui.separator();
                if ui.button(txt("gui.settings_title", "Settings")).clicked() {
                    self.settings_status = None;
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx, &txt);
        }

        // 오류 대화상자가 떠 있는 동안 폼은 잠근다
        let form_enabled = self.error.is_none();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_enabled_ui(form_enabled, |ui| self.ui_form(ui, &txt));
            });
        });

        self.ui_error(ctx, &txt);
    }
}

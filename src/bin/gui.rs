#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::collections::HashMap;
use std::{fs, path::Path};

use chrono::Local;
use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use construction_waste_toolbox::{
    app::{self, AnalysisOutcome, AnalysisRequest, AppError},
    config,
    i18n::{self, keys},
    logging,
    units::{convert_mass, AreaUnit, MassUnit},
    waste::{
        report::{self, criteria_lines, format_number, seal_headline},
        AnalysisError, AnalysisTotals, WasteAnalyzer,
    },
};

const WASTE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x87, 0xCE, 0xFA);
const CO2_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0x66, 0xCC);

#[derive(Debug, Parser)]
#[command(name = "construction_waste_toolbox", version, about)]
struct GuiArgs {
    /// 언어 (auto/ko/en/pt)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
}

fn main() -> Result<(), eframe::Error> {
    logging::init();
    let args = GuiArgs::parse();

    let app_cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    tracing::debug!(
        lang = %i18n::resolve_language(&args.lang, Some(app_cfg.language.as_str())),
        "gui language"
    );

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(1000.0, 760.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Construction Waste Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("font setup: {e}");
            }
            Box::new(GuiApp::new(app_cfg, &args.lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "SJG.png"];
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

/// 바이너리 폰트 바이트를 egui에 등록.
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

/// 한글 표시용 폰트를 찾는다. assets/fonts → Windows 시스템 폰트 순.
/// 찾지 못하면 기본 폰트를 유지하고 Err를 돌려준다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Korean font not found; keeping default font.".into())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    analyzer: Option<WasteAnalyzer>,
    catalog_error: Option<String>,
    lang_input: String,
    status: Option<String>,
    show_settings_modal: bool,
    show_help_modal: bool,

    area: f64,
    /// 체크한 순서대로 유지한다.
    selected: Vec<String>,
    /// 0이면 기준 소비량
    overrides: HashMap<String, f64>,
    inputs_dirty: bool,

    outcome: Option<AnalysisOutcome>,
    error: Option<String>,
    badge_texture: Option<egui::TextureHandle>,
}

impl GuiApp {
    fn new(config: config::Config, cli_lang: &str) -> Self {
        let tr = app::translator_for(&config, cli_lang);
        let (analyzer, catalog_error) = match config.load_catalog() {
            Ok(catalog) => (Some(WasteAnalyzer::new(catalog)), None),
            Err(e) => {
                tracing::error!("{e}");
                (None, Some(e.to_string()))
            }
        };
        let lang_input = config.language.clone();
        Self {
            config,
            tr,
            analyzer,
            catalog_error,
            lang_input,
            status: None,
            show_settings_modal: false,
            show_help_modal: false,
            area: 100.0,
            selected: Vec::new(),
            overrides: HashMap::new(),
            inputs_dirty: true,
            outcome: None,
            error: None,
            badge_texture: None,
        }
    }

    fn txt(&self, key: &str, default: &str) -> String {
        self.tr.lookup(key).unwrap_or_else(|| default.to_string())
    }

    /// 체크박스 토글. 선택 순서를 유지한다.
    fn toggle_material(&mut self, name: &str, on: bool) {
        if on {
            if !self.selected.iter().any(|s| s == name) {
                self.selected.push(name.to_string());
            }
        } else {
            self.selected.retain(|s| s != name);
        }
        self.inputs_dirty = true;
    }

    /// 선택된 자재의 사용자 소비량만 요청에 담는다.
    fn build_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            area: self.area,
            area_unit: self.config.area_unit,
            materials: self.selected.clone(),
            overrides: self
                .selected
                .iter()
                .filter_map(|name| self.overrides.get(name).map(|v| (name.clone(), *v)))
                .collect(),
        }
    }

    fn recompute(&mut self) {
        self.inputs_dirty = false;
        let Some(analyzer) = &self.analyzer else {
            return;
        };
        let request = self.build_request();
        match app::run_analysis(
            analyzer,
            &self.config,
            &self.tr,
            &request,
            Local::now().naive_local(),
        ) {
            Ok(outcome) => {
                self.outcome = Some(outcome);
                self.error = None;
            }
            Err(AppError::Analysis(AnalysisError::EmptySelection)) => {
                self.outcome = None;
                self.error = Some(self.tr.t(keys::INFO_SELECT_AT_LEAST_ONE));
            }
            Err(e) => {
                self.outcome = None;
                self.error = Some(e.to_string());
            }
        }
    }

    fn badge_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        if self.badge_texture.is_none() {
            let badge = self.outcome.as_ref()?.badge.as_ref()?;
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [badge.width as usize, badge.height as usize],
                &badge.rgba,
            );
            self.badge_texture =
                Some(ctx.load_texture("seal_badge", image, egui::TextureOptions::LINEAR));
        }
        self.badge_texture.clone()
    }

    fn save_report(&mut self) {
        let Some(outcome) = &self.outcome else {
            return;
        };
        let file_name = report::report_file_name(outcome.timestamp);
        let Some(path) = FileDialog::new()
            .set_directory(&self.config.report_dir)
            .set_file_name(file_name.as_str())
            .add_filter("Text", &["txt"])
            .save_file()
        else {
            return;
        };
        self.status = Some(match fs::write(&path, &outcome.report) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "report written");
                self.tr
                    .tf(keys::RESULT_REPORT_SAVED, &[("path", path.display().to_string())])
            }
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let Some(analyzer) = self.analyzer.clone() else {
            return;
        };
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                label_with_tip(
                    ui,
                    &self.txt("gui.input.area", "Construction area"),
                    &self.txt("gui.input.area_tip", "Floor area the consumption rates apply to"),
                );
                if ui
                    .add(
                        egui::DragValue::new(&mut self.area)
                            .speed(1.0)
                            .clamp_range(1.0..=1.0e7),
                    )
                    .changed()
                {
                    self.inputs_dirty = true;
                }
                ui.label(self.config.area_unit.symbol());
            });
            ui.separator();
            ui.label(self.txt("gui.input.materials", "Materials to analyse"));
            ui.horizontal_wrapped(|ui| {
                for name in analyzer.catalog().names() {
                    let mut checked = self.selected.iter().any(|s| s == name);
                    if ui.checkbox(&mut checked, name).changed() {
                        self.toggle_material(name, checked);
                    }
                }
            });
        });

        if self.selected.is_empty() {
            return;
        }
        ui.add_space(6.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(self.tr.t(keys::OVERRIDE_HEADING));
            egui::Grid::new("override_grid")
                .num_columns(3)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for name in self.selected.clone() {
                        let Some(spec) = analyzer.catalog().get(&name) else {
                            continue;
                        };
                        ui.label(name.as_str());
                        let value = self.overrides.entry(name.clone()).or_insert(0.0);
                        if ui
                            .add(
                                egui::DragValue::new(value)
                                    .speed(0.1)
                                    .clamp_range(0.0..=f64::MAX)
                                    .max_decimals(4),
                            )
                            .changed()
                        {
                            self.inputs_dirty = true;
                        }
                        ui.label(format!(
                            "{} ({}: {})",
                            spec.unit.rate_label(),
                            self.txt("gui.input.default", "default"),
                            spec.default_consumption
                        ));
                        ui.end_row();
                    }
                });
        });
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let Some(outcome) = self.outcome.clone() else {
            return;
        };
        let mass_unit = self.config.mass_unit;
        let mass = |kg: f64| format_number(convert_mass(kg, MassUnit::Kilogram, mass_unit), 2);

        ui.heading(self.txt("gui.results.heading", "Calculation summary"));
        egui::Grid::new("results_grid")
            .striped(true)
            .num_columns(7)
            .spacing([14.0, 4.0])
            .show(ui, |ui| {
                for h in [
                    self.txt("gui.results.material", "Material"),
                    self.txt("gui.results.total", "Total consumption"),
                    format!("{} [{}]", self.txt("gui.results.mass", "Mass"), mass_unit.symbol()),
                    format!("{} [{}]", self.tr.t(keys::REPORT_WASTE), mass_unit.symbol()),
                    format!("{} [kg]", self.tr.t(keys::REPORT_CO2)),
                    self.tr.t(keys::REPORT_REUSE),
                    self.tr.t(keys::REPORT_DISPOSAL),
                ] {
                    ui.strong(h);
                }
                ui.end_row();
                for r in &outcome.results {
                    if r.exceeded_default {
                        ui.colored_label(egui::Color32::from_rgb(0xE0, 0x80, 0x20), r.name.as_str())
                            .on_hover_text(self.tr.t(keys::REPORT_EXCEEDED));
                    } else {
                        ui.label(r.name.as_str());
                    }
                    ui.label(format!(
                        "{} {}",
                        format_number(r.total_consumption, 2),
                        r.unit.quantity_label()
                    ));
                    ui.label(mass(r.mass_kg));
                    ui.label(mass(r.waste_kg));
                    ui.label(format_number(r.co2_kg, 2));
                    ui.label(r.reuse_note.as_str());
                    ui.label(r.disposal_note.as_str());
                    ui.end_row();
                }
            });

        let totals = AnalysisTotals::from_results(&outcome.results);
        ui.add_space(4.0);
        ui.label(format!(
            "{}: {} {}",
            self.tr.t(keys::REPORT_TOTAL_WASTE),
            mass(totals.waste_kg),
            mass_unit.symbol()
        ));
        ui.label(format!(
            "{}: {} kg",
            self.tr.t(keys::REPORT_TOTAL_CO2),
            format_number(totals.co2_kg, 2)
        ));

        ui.add_space(8.0);
        bar_chart(
            ui,
            &outcome
                .results
                .iter()
                .map(|r| (r.name.as_str(), r.waste_kg, r.co2_kg))
                .collect::<Vec<_>>(),
            &format!("{} (kg)", self.tr.t(keys::REPORT_WASTE)),
            &format!("{} (kg)", self.tr.t(keys::REPORT_CO2)),
        );

        ui.add_space(8.0);
        ui.heading(self.txt("gui.seal.heading", "Green seal result"));
        let headline = seal_headline(&self.tr, &outcome.verdict);
        if outcome.verdict.granted() {
            ui.colored_label(egui::Color32::from_rgb(0x2E, 0x9E, 0x44), headline);
            match self.badge_texture(ui.ctx()) {
                Some(tex) => {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(&tex))
                            .max_width(140.0),
                    );
                }
                None => {
                    ui.colored_label(
                        egui::Color32::from_rgb(0xE0, 0xA0, 0x20),
                        self.tr.tf(
                            keys::BADGE_MISSING,
                            &[("path", self.config.badge_path.display().to_string())],
                        ),
                    );
                }
            }
        } else {
            ui.colored_label(egui::Color32::from_rgb(0xD0, 0x30, 0x30), headline);
        }
        ui.label(self.tr.t(keys::REPORT_CRITERIA));
        for c in criteria_lines(&self.tr, &outcome.verdict, &self.config.seal) {
            ui.label(format!("{} {}", c.mark(), c.text));
        }

        ui.add_space(8.0);
        if ui
            .button(self.txt("gui.report.save", "Save report (.txt)"))
            .clicked()
        {
            self.save_report();
        }
        if let Some(msg) = &self.status {
            ui.small(msg.as_str());
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        ui.label(self.txt("gui.settings.lang", "Language"));
        egui::ComboBox::from_id_source("lang_choice")
            .selected_text(self.lang_input.as_str())
            .show_ui(ui, |ui| {
                for (code, label) in [
                    ("auto", "System"),
                    ("ko", "한국어"),
                    ("en", "English"),
                    ("pt", "Português"),
                ] {
                    ui.selectable_value(&mut self.lang_input, code.to_string(), label);
                }
            });
        ui.small(format!(
            "{}: {}",
            self.txt("gui.settings.active_lang", "Active"),
            self.tr.language_code()
        ));
        ui.separator();
        ui.label(self.txt("gui.settings.area_unit", "Area unit"));
        ui.horizontal(|ui| {
            for unit in AreaUnit::ALL {
                changed |= ui
                    .selectable_value(&mut self.config.area_unit, unit, unit.symbol())
                    .changed();
            }
        });
        ui.label(self.txt("gui.settings.mass_unit", "Mass unit"));
        ui.horizontal(|ui| {
            for unit in MassUnit::ALL {
                changed |= ui
                    .selectable_value(&mut self.config.mass_unit, unit, unit.symbol())
                    .changed();
            }
        });
        if changed {
            self.inputs_dirty = true;
        }
        ui.separator();
        if ui.button(self.txt("gui.settings.save", "Save settings")).clicked() {
            self.config.language = self.lang_input.clone();
            self.tr = app::translator_for(&self.config, "auto");
            self.inputs_dirty = true;
            self.status = Some(match self.config.save() {
                Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
                Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
            });
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if self.inputs_dirty {
            let was_granted = self.outcome.as_ref().map(|o| o.verdict.granted());
            self.recompute();
            if self.outcome.as_ref().map(|o| o.verdict.granted()) != was_granted {
                self.badge_texture = None;
            }
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.txt("gui.nav.app_title", "♻️ Construction Waste Toolbox"));
                ui.separator();
                if ui.button(self.txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(self.txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            let mut open = true;
            egui::Window::new(self.txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| self.ui_settings(ui));
            self.show_settings_modal = open;
        }

        if self.show_help_modal {
            let mut open = true;
            let tr = self.tr.clone();
            let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(txt(
                        "gui.about.formula",
                        "Total = consumption × area; mass = total × density (m³, un) or total (kg); waste = mass × waste fraction; CO₂ = waste × CO₂ factor.",
                    ));
                    ui.label(txt(
                        "gui.about.override",
                        "Custom consumption 0 means the material default is used.",
                    ));
                    ui.label(txt(
                        "gui.about.seal",
                        "Green seal: no material above default, CO₂/m² within limit, reusable share at least the target.",
                    ));
                });
            self.show_help_modal = open;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if let Some(err) = &self.catalog_error {
                        ui.colored_label(egui::Color32::RED, err.as_str());
                        return;
                    }
                    self.ui_inputs(ui);
                    ui.add_space(8.0);
                    if let Some(err) = &self.error {
                        ui.label(err.as_str());
                    }
                    self.ui_results(ui);
                });
        });
    }
}

/// 자재별 폐기물/CO₂ 묶음 막대 그래프.
fn bar_chart(ui: &mut egui::Ui, rows: &[(&str, f64, f64)], waste_label: &str, co2_label: &str) {
    if rows.is_empty() {
        return;
    }
    let height = 240.0;
    let width = ui.available_width().max(320.0);
    let (response, painter) = ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();
    let font = egui::FontId::proportional(12.0);

    let plot = egui::Rect::from_min_max(
        rect.min + egui::vec2(56.0, 24.0),
        rect.max - egui::vec2(8.0, 28.0),
    );
    let max_value = axis_max(rows.iter().flat_map(|(_, w, c)| [*w, *c]));
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        egui::Stroke::new(1.0, text_color),
    );
    for i in 0..=4 {
        let v = max_value * i as f64 / 4.0;
        let y = plot.bottom() - plot.height() * (i as f32 / 4.0);
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            format_number(v, 0),
            font.clone(),
            text_color,
        );
    }

    let group_w = plot.width() / rows.len() as f32;
    let bar_w = (group_w * 0.35).min(48.0);
    for (i, (name, waste, co2)) in rows.iter().enumerate() {
        let center = plot.left() + group_w * (i as f32 + 0.5);
        for (offset, value, color) in [(-bar_w, *waste, WASTE_COLOR), (0.0, *co2, CO2_COLOR)] {
            let h = (value / max_value) as f32 * plot.height();
            let bar = egui::Rect::from_min_max(
                egui::pos2(center + offset, plot.bottom() - h),
                egui::pos2(center + offset + bar_w, plot.bottom()),
            );
            painter.rect_filled(bar, 0.0, color);
        }
        painter.text(
            egui::pos2(center, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            *name,
            font.clone(),
            text_color,
        );
    }

    for (i, (label, color)) in [(waste_label, WASTE_COLOR), (co2_label, CO2_COLOR)]
        .into_iter()
        .enumerate()
    {
        let x = rect.left() + 60.0 + i as f32 * 140.0;
        painter.rect_filled(
            egui::Rect::from_min_size(egui::pos2(x, rect.top() + 4.0), egui::vec2(12.0, 12.0)),
            0.0,
            color,
        );
        painter.text(
            egui::pos2(x + 16.0, rect.top() + 10.0),
            egui::Align2::LEFT_CENTER,
            label,
            font.clone(),
            text_color,
        );
    }
}

/// 축 최댓값을 1, 2, 5 × 10^n 으로 올림한다. 값이 모두 0이면 1.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .find(|m| m * magnitude >= max)
        .unwrap_or(10.0);
    step * magnitude
}

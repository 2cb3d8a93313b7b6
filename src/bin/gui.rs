#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use pv_canopy_exemption::{
    config, exemption,
    exemption::{SimulationInput, SimulationResult},
    form::{FieldId, FieldKind, FormError, FormState},
    i18n::{self, keys},
    report, telemetry,
};
use rfd::FileDialog;
use std::{env, fs, path::Path};
use tracing::{info, warn};

const WARN_COLOR: egui::Color32 = egui::Color32::from_rgb(214, 140, 20);
const EXEMPT_COLOR: egui::Color32 = egui::Color32::from_rgb(40, 160, 70);
const NOT_EXEMPT_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 60, 50);

fn main() -> Result<(), eframe::Error> {
    telemetry::init_tracing("info");

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/fr-fr/en-us)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([760.0, 920.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!(%e, "설정 로드 실패, 기본값 사용");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "PV Canopy Exemption",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg.clone()))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
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

/// 필드별 드래그 속도.
fn drag_speed(field: FieldId) -> f64 {
    match field {
        FieldId::PricePerKwh => 0.001,
        FieldId::ParkingSurface | FieldId::ShadeSurface => 10.0,
        FieldId::AnnualMaintenance | FieldId::TotalSubsidies => 50.0,
        _ => 100.0,
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    form: FormState,
    show_methodology: bool,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let form = FormState::from_defaults(&config.defaults);
        Self {
            lang_input: lang_code,
            config,
            tr,
            form,
            show_methodology: false,
            status: None,
        }
    }

    fn apply_language(&mut self) {
        self.config.language = self.lang_input.clone();
        let pack_dir = self.config.language_pack_dir.as_deref();
        self.tr = i18n::Translator::new_with_pack(&self.lang_input, pack_dir);
        if let Err(e) = self.config.save() {
            warn!(%e, "설정 저장 실패");
            self.status = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)));
        }
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::FORM_HEADING));
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::FORM_SITE_NAME));
            ui.text_edit_singleline(&mut self.form.site_name);
        });
        ui.add_space(6.0);
        egui::Grid::new("form_grid")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .striped(true)
            .show(ui, |ui| {
                for field in FieldId::ALL {
                    ui.vertical(|ui| {
                        ui.label(tr.t(field.label_key()));
                        match field.kind() {
                            FieldKind::Number => {
                                ui.add(
                                    egui::DragValue::new(self.form.value_mut(field))
                                        .speed(drag_speed(field)),
                                );
                            }
                            FieldKind::Slider { min, max, step } => {
                                ui.add(
                                    egui::Slider::new(self.form.value_mut(field), min..=max)
                                        .step_by(step),
                                );
                                if let Some(hint) = field.hint_key() {
                                    ui.small(tr.t(hint));
                                }
                            }
                        }
                    });
                    ui.checkbox(self.form.verified_mut(field), tr.t(keys::FORM_VERIFIED));
                    ui.end_row();
                }
            });
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let input = match self.form.build_input() {
            Ok(input) => input,
            Err(FormError::MissingSiteName) => {
                ui.colored_label(WARN_COLOR, tr.t(keys::FORM_WARN_SITE_NAME));
                return;
            }
            Err(FormError::Unverified(_)) => {
                ui.colored_label(WARN_COLOR, tr.t(keys::FORM_WARN_UNVERIFIED));
                return;
            }
        };
        let result = match exemption::compute(&input) {
            Ok(result) => result,
            Err(e) => {
                ui.colored_label(NOT_EXEMPT_COLOR, format!("{}: {e}", tr.t(keys::ERROR_PREFIX)));
                return;
            }
        };

        ui.heading(tr.t(keys::RESULTS_HEADING));
        egui::Grid::new("result_grid")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for line in report::result_lines(&result, input.exemption_threshold_percent, &tr) {
                    ui.label(line.label);
                    ui.strong(line.value);
                    ui.end_row();
                }
            });
        ui.add_space(6.0);
        let color = if result.is_exempt {
            EXEMPT_COLOR
        } else {
            NOT_EXEMPT_COLOR
        };
        ui.colored_label(
            color,
            format!("{} {}", tr.t(keys::RESULT_EXEMPT), tr.yes_no(result.is_exempt)),
        );
        ui.label(tr.t(keys::RESULT_ADVICE));
        ui.add_space(6.0);
        if ui.button(tr.t(keys::REPORT_EXPORT)).clicked() {
            self.export_pdf(&input, &result);
        }
        if let Some(msg) = &self.status {
            ui.label(msg);
        }
    }

    fn export_pdf(&mut self, input: &SimulationInput, result: &SimulationResult) {
        let Some(path) = FileDialog::new()
            .set_file_name(self.config.report_path.as_str())
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            return;
        };
        let report = report::Report::new(input, result, &self.tr);
        self.status = Some(match report.write_pdf(&path) {
            Ok(()) => {
                info!(path = %path.display(), "GUI PDF 내보내기");
                self.tr
                    .tf(keys::REPORT_SAVED, &[("path", path.display().to_string())])
            }
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::REPORT_METHODOLOGY)).clicked() {
                    self.show_methodology = true;
                }
                let before = self.lang_input.clone();
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "fr-fr".into(), "Français");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                    });
                if before != self.lang_input {
                    self.apply_language();
                }
            });
        });

        if self.show_methodology {
            let text = report::methodology(tr.language());
            egui::Window::new(tr.t(keys::REPORT_METHODOLOGY))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_methodology)
                .show(ctx, |ui| {
                    ui.label(text);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(tr.t(keys::APP_INTRO));
                ui.separator();
                self.ui_form(ui);
                ui.separator();
                self.ui_results(ui);
            });
        });
    }
}

use super::{Intent, Phase, ResultPane, SaveStatus, SheetConverter};
use crate::upload::{DownloadLink, FileProcessor, Mode, PickerKind, SelectedFile, ACCEPTED_EXTENSIONS};
use crate::utils::file_size::human_size;
use eframe::egui::{self, Align, Color32, RichText};
use rfd::FileDialog;
use std::path::PathBuf;

const ACCENT: Color32 = Color32::from_rgb(46, 125, 50);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);

enum PickSource {
    OneFile,
    ManyFiles,
    Folder,
}

/// What a click asked for; run after the frame's widgets are laid out.
enum UiAction {
    Dispatch(Intent),
    Pick(PickSource),
    Save(DownloadLink),
    Open(PathBuf),
}

impl SheetConverter {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 30.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Excel to PDF Converter");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Turn attendance sheets into printable PDF reports")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_mode_buttons(ui, &mut actions);
                    ui.add_space(15.0);
                    self.render_file_step(ui, &mut actions);
                    ui.add_space(15.0);
                    self.render_fields(ui);
                    ui.add_space(20.0);

                    ui.vertical_centered(|ui| {
                        let button = egui::Button::new(self.state.mode.submit_caption())
                            .min_size(egui::vec2(200.0, 40.0));
                        if ui.add(button).clicked() {
                            actions.push(UiAction::Dispatch(Intent::Submit));
                        }
                        if self.state.phase() == Phase::Idle {
                            ui.label(
                                RichText::new("Select a spreadsheet to get started")
                                    .small()
                                    .color(ui.visuals().weak_text_color()),
                            );
                        }
                    });

                    ui.add_space(20.0);
                    self.render_result(ui, &mut actions);
                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("Server: {}", self.server_url))
                        .small()
                        .color(ui.visuals().weak_text_color()),
                );
            });
        });

        for action in actions {
            self.run_action(ctx, action);
        }
    }

    fn render_mode_buttons(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            for mode in [Mode::Single, Mode::Batch] {
                let label = RichText::new(mode.label()).size(15.0);
                if ui
                    .selectable_label(self.state.is_active(mode), label)
                    .clicked()
                {
                    actions.push(UiAction::Dispatch(Intent::SwitchMode(mode)));
                }
            }
        });
    }

    fn render_file_step(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let mode = self.state.mode;
        ui.group(|ui| {
            ui.label(RichText::new(mode.step_title()).strong());
            ui.add_space(8.0);

            if self.state.drop_zone_visible {
                let fill = if self.state.drop_hover {
                    ACCENT.gamma_multiply(0.3)
                } else {
                    ui.visuals().extreme_bg_color
                };
                let zone = egui::Button::new(mode.drop_hint())
                    .fill(fill)
                    .min_size(egui::vec2(ui.available_width(), 90.0));
                if ui.add(zone).clicked() {
                    actions.push(UiAction::Pick(default_pick(mode)));
                }
            }

            if mode.picker() == PickerKind::FilesOrFolder {
                ui.horizontal(|ui| {
                    if ui.button("📁 Select Folder").clicked() {
                        actions.push(UiAction::Pick(PickSource::Folder));
                    }
                    if ui.button("📄 Select Files").clicked() {
                        actions.push(UiAction::Pick(PickSource::ManyFiles));
                    }
                });
            }

            if let Some(info) = &self.state.file_info {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.colored_label(ACCENT, info);
                    if mode.picker() == PickerKind::OneFile && ui.small_button("Change").clicked() {
                        actions.push(UiAction::Pick(PickSource::OneFile));
                    }
                });
            }
        });
    }

    fn render_fields(&mut self, ui: &mut egui::Ui) {
        let mode = self.state.mode;
        let fields = &mut self.state.fields;
        ui.group(|ui| {
            ui.label(RichText::new("Step 2: Report Details").strong());
            ui.add_space(8.0);
            egui::Grid::new("report_fields")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    if mode == Mode::Single {
                        ui.label("Title");
                        ui.text_edit_singleline(&mut fields.title);
                        ui.end_row();
                    }

                    ui.label("Subtitle");
                    ui.text_edit_singleline(&mut fields.subtitle);
                    ui.end_row();

                    ui.label("Report date");
                    ui.add(
                        egui::TextEdit::singleline(&mut fields.report_date).hint_text("YYYY-MM-DD"),
                    );
                    ui.end_row();
                });
        });
    }

    fn render_result(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.vertical_centered(|ui| match &self.state.result {
            ResultPane::Empty => {}
            ResultPane::Converting => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(ResultPane::CONVERTING_TEXT);
                    if self.state.in_flight > 1 {
                        ui.label(format!("({} requests running)", self.state.in_flight));
                    }
                });
            }
            ResultPane::Ready(link) => {
                let button = egui::Button::new(RichText::new(link.label).size(16.0))
                    .min_size(egui::vec2(220.0, 36.0));
                if ui
                    .add(button)
                    .on_hover_text(&link.file_name)
                    .clicked()
                {
                    actions.push(UiAction::Save(link.clone()));
                }
                ui.label(
                    RichText::new(format!("{} · {}", link.file_name, human_size(link.bytes.len())))
                        .small(),
                );

                match &self.state.saved {
                    Some(SaveStatus::Saved(path)) => {
                        ui.horizontal(|ui| {
                            ui.label(format!("Saved to {}", path.display()));
                            if ui.small_button("Open").clicked() {
                                actions.push(UiAction::Open(path.clone()));
                            }
                        });
                    }
                    Some(SaveStatus::Failed(message)) => {
                        ui.colored_label(ERROR_RED, message);
                    }
                    None => {}
                }
            }
            ResultPane::Failed(message) => {
                ui.colored_label(ERROR_RED, message);
            }
        });
    }

    fn run_action(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::Dispatch(intent) => self.apply(ctx, intent),
            UiAction::Pick(source) => {
                let files = self.pick_files(source);
                self.apply(ctx, Intent::FilesPicked(files));
            }
            UiAction::Save(link) => self.save_download(ctx, &link),
            UiAction::Open(path) => self.open_saved(&path),
        }
    }

    fn pick_files(&self, source: PickSource) -> Vec<SelectedFile> {
        let extensions = ACCEPTED_EXTENSIONS.map(|ext| ext.trim_start_matches('.'));
        let dialog = FileDialog::new();
        match source {
            PickSource::OneFile => dialog
                .add_filter("Excel / CSV", &extensions)
                .add_filter("All files", &["*"])
                .pick_file()
                .map(SelectedFile::from_path)
                .into_iter()
                .collect(),
            PickSource::ManyFiles => dialog
                .add_filter("Excel / CSV", &extensions)
                .add_filter("All files", &["*"])
                .pick_files()
                .unwrap_or_default()
                .into_iter()
                .map(SelectedFile::from_path)
                .collect(),
            PickSource::Folder => dialog
                .pick_folder()
                .map(|folder| FileProcessor::collect_folder(&folder))
                .unwrap_or_default(),
        }
    }
}

fn default_pick(mode: Mode) -> PickSource {
    match mode.picker() {
        PickerKind::OneFile => PickSource::OneFile,
        PickerKind::FilesOrFolder => PickSource::Folder,
    }
}

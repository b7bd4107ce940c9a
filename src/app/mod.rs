mod controller;
mod state;
mod ui;

use crate::config::Settings;
use crate::error::ConvertError;
use crate::upload::{ConversionClient, ConversionRequest, DownloadLink, SelectedFile};
use controller::{Effect, Intent};
use eframe::{egui, App};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use state::{Phase, ResultPane, SaveStatus, UploadState};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self as std_mpsc, Receiver, Sender};

pub struct SheetConverter {
    state: UploadState,
    client: ConversionClient,
    server_url: String,
    output_dir: Option<PathBuf>,
    events_tx: Sender<Intent>,
    events_rx: Receiver<Intent>,
}

impl SheetConverter {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        tracing::info!("using conversion service at {}", settings.server_url);
        let (events_tx, events_rx) = std_mpsc::channel();
        Self {
            state: UploadState::default(),
            client: ConversionClient::new(&settings.server_url),
            server_url: settings.server_url,
            output_dir: settings.output_dir,
            events_tx,
            events_rx,
        }
    }

    pub fn apply(&mut self, ctx: &egui::Context, intent: Intent) {
        if let Some(effect) = self.state.dispatch(intent) {
            self.run_effect(ctx, effect);
        }
    }

    fn run_effect(&mut self, ctx: &egui::Context, effect: Effect) {
        match effect {
            Effect::Alert(message) => {
                MessageDialog::new()
                    .set_level(MessageLevel::Warning)
                    .set_title("Spreadsheet to PDF")
                    .set_description(message)
                    .set_buttons(MessageButtons::Ok)
                    .show();
            }
            Effect::StartConversion(request) => self.spawn_conversion(ctx, request),
        }
    }

    /// One background thread and runtime per submission; the outcome comes
    /// back through the event channel.
    fn spawn_conversion(&self, ctx: &egui::Context, request: ConversionRequest) {
        let client = self.client.clone();
        let sender = self.events_tx.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(client.convert(&request)),
                Err(e) => {
                    tracing::error!("failed to build conversion runtime: {}", e);
                    Err(ConvertError::Io(e))
                }
            };
            if let Err(ref e) = outcome {
                tracing::error!("conversion request failed: {}", e);
            }
            if sender
                .send(Intent::ConversionFinished { request, outcome })
                .is_err()
            {
                tracing::warn!("window closed before conversion finished");
            }
            ctx.request_repaint();
        });
    }

    pub fn save_download(&mut self, ctx: &egui::Context, link: &DownloadLink) {
        let mut dialog = FileDialog::new().set_file_name(&link.file_name);
        if let Some(dir) = &self.output_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            tracing::debug!("save dialog cancelled");
            return;
        };

        let result = std::fs::write(&path, &link.bytes).map(|_| path);
        self.apply(ctx, Intent::DownloadSaved(result));
    }

    pub fn open_saved(&self, path: &Path) {
        if let Err(e) = open::that(path) {
            tracing::error!("failed to open {}: {}", path.display(), e);
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        while let Ok(intent) = self.events_rx.try_recv() {
            self.apply(ctx, intent);
        }

        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        if hovering != self.state.drop_hover {
            self.apply(ctx, Intent::DragHover(hovering));
        }

        if !dropped.is_empty() {
            let files: Vec<SelectedFile> = dropped.iter().filter_map(selected_from_drop).collect();
            self.apply(ctx, Intent::FilesDropped(files));
        }
    }
}

/// Native drops carry a path; web-style drops carry the bytes.
fn selected_from_drop(file: &egui::DroppedFile) -> Option<SelectedFile> {
    if let Some(path) = &file.path {
        let mut selected = SelectedFile::from_path(path.clone());
        if !file.name.is_empty() {
            selected.name = file.name.clone();
        }
        return Some(selected);
    }
    file.bytes
        .as_ref()
        .map(|bytes| SelectedFile::from_bytes(file.name.clone(), bytes.clone()))
}

impl App for SheetConverter {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}

//! Intent dispatch for the upload form: every user or background event is an
//! [`Intent`], and [`UploadState::dispatch`] applies it and names the side
//! effect the app has to run, if any.

use super::state::{ResultPane, SaveStatus, UploadState};
use crate::error::ConvertError;
use crate::upload::{ConversionRequest, FileProcessor, Mode, SelectedFile};
use std::path::PathBuf;
use std::sync::Arc;

pub const DROP_REJECTED_ALERT: &str = "Please drop Excel files (.xlsx, .xls, or .csv)";
pub const NO_FILES_ALERT: &str = "Please select Excel file(s)!";

#[derive(Debug)]
pub enum Intent {
    SwitchMode(Mode),
    DragHover(bool),
    FilesDropped(Vec<SelectedFile>),
    FilesPicked(Vec<SelectedFile>),
    Submit,
    ConversionFinished {
        request: ConversionRequest,
        outcome: Result<Arc<[u8]>, ConvertError>,
    },
    DownloadSaved(Result<PathBuf, std::io::Error>),
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    Alert(&'static str),
    StartConversion(ConversionRequest),
}

pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

impl UploadState {
    pub fn dispatch(&mut self, intent: Intent) -> Option<Effect> {
        match intent {
            Intent::SwitchMode(mode) => {
                tracing::debug!("switching to {:?} mode", mode);
                self.mode = mode;
                self.clear_selection();
                None
            }
            Intent::DragHover(hovering) => {
                self.drop_hover = hovering;
                None
            }
            Intent::FilesDropped(files) => self.files_dropped(files),
            Intent::FilesPicked(files) => {
                self.files_picked(files);
                None
            }
            Intent::Submit => self.submit(),
            Intent::ConversionFinished { request, outcome } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.saved = None;
                self.result = match outcome {
                    Ok(bytes) => {
                        let link = FileProcessor::download_link(&request, bytes);
                        tracing::info!("conversion ready: {}", link.file_name);
                        ResultPane::Ready(link)
                    }
                    Err(err) => {
                        tracing::warn!("conversion failed: {}", err);
                        ResultPane::Failed(err.user_message())
                    }
                };
                None
            }
            Intent::DownloadSaved(result) => {
                self.saved = Some(match result {
                    Ok(path) => {
                        tracing::info!("saved download to {}", path.display());
                        SaveStatus::Saved(path)
                    }
                    Err(e) => {
                        tracing::error!("failed to save download: {}", e);
                        SaveStatus::Failed(format!("Could not save file: {}", e))
                    }
                });
                None
            }
        }
    }

    fn files_dropped(&mut self, files: Vec<SelectedFile>) -> Option<Effect> {
        let accepted = FileProcessor::accepted(&files);
        let Some(first) = accepted.first() else {
            tracing::warn!("dropped {} file(s), none accepted", files.len());
            self.drop_hover = false;
            return Some(Effect::Alert(DROP_REJECTED_ALERT));
        };

        let count = accepted.len();
        let first_name = first.name.clone();
        tracing::info!("dropped {} file(s), {} accepted", files.len(), count);
        self.selection = files;
        self.show_loaded(count, &first_name);
        None
    }

    /// Unlike a drop, a pick with no accepted files still shows the banner.
    fn files_picked(&mut self, files: Vec<SelectedFile>) {
        let Some(first) = files.first() else {
            return;
        };

        let count = FileProcessor::accepted(&files).len();
        let first_name = first.name.clone();
        tracing::info!("picked {} file(s), {} accepted", files.len(), count);
        self.selection = files;
        self.show_loaded(count, &first_name);
    }

    fn show_loaded(&mut self, accepted: usize, first_name: &str) {
        self.drop_zone_visible = false;
        self.drop_hover = false;
        let info = match self.mode {
            Mode::Batch => format!("✅ {} Excel file(s) loaded", accepted),
            Mode::Single => {
                self.fields.title = FileProcessor::title_from_filename(first_name);
                self.fields.report_date = today();
                format!("✅ File loaded: {}", first_name)
            }
        };
        self.file_info = Some(info);
    }

    fn submit(&mut self) -> Option<Effect> {
        let Some(request) = FileProcessor::build_request(self.mode, &self.selection, &self.fields)
        else {
            tracing::warn!("submit without a selection");
            return Some(Effect::Alert(NO_FILES_ALERT));
        };

        tracing::info!("submitting {:?} conversion to {}", self.mode, request.endpoint());
        self.result = ResultPane::Converting;
        self.saved = None;
        self.in_flight += 1;
        Some(Effect::StartConversion(request))
    }
}

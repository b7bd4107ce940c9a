use crate::upload::{DownloadLink, FormFields, Mode, SelectedFile};
use derivative::Derivative;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultPane {
    #[default]
    Empty,
    Converting,
    Ready(DownloadLink),
    Failed(String),
}

impl ResultPane {
    pub const CONVERTING_TEXT: &'static str = "Converting to PDF... Please wait...";
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    Saved(PathBuf),
    Failed(String),
}

/// Where the form is in its lifecycle, derived from the state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FilesSelected,
    Submitting,
    ResultReady,
    ResultError,
}

#[derive(Derivative)]
#[derivative(Debug, Default)]
pub struct UploadState {
    pub mode: Mode,
    pub selection: Vec<SelectedFile>,
    /// `None` while the banner is hidden.
    pub file_info: Option<String>,
    #[derivative(Default(value = "true"))]
    pub drop_zone_visible: bool,
    pub drop_hover: bool,
    pub fields: FormFields,
    pub result: ResultPane,
    pub saved: Option<SaveStatus>,
    pub in_flight: usize,
}

impl UploadState {
    pub fn phase(&self) -> Phase {
        match &self.result {
            ResultPane::Converting => Phase::Submitting,
            ResultPane::Ready(_) => Phase::ResultReady,
            ResultPane::Failed(_) => Phase::ResultError,
            ResultPane::Empty if self.selection.is_empty() => Phase::Idle,
            ResultPane::Empty => Phase::FilesSelected,
        }
    }

    pub fn is_active(&self, mode: Mode) -> bool {
        self.mode == mode
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.file_info = None;
        self.drop_zone_visible = true;
        self.drop_hover = false;
    }
}

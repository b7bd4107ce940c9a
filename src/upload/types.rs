use derivative::Derivative;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Single,
    Batch,
}

/// How the file picker is configured for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    OneFile,
    FilesOrFolder,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Single => "📄 Single File",
            Mode::Batch => "📁 Batch (Folder)",
        }
    }

    pub fn step_title(self) -> &'static str {
        match self {
            Mode::Single => "Step 1: Upload Excel File",
            Mode::Batch => "Step 1: Upload Excel Files (Folder)",
        }
    }

    pub fn drop_hint(self) -> &'static str {
        match self {
            Mode::Single => "Drag & Drop Your Excel File Here or Click to Browse",
            Mode::Batch => "Drag & Drop Your Excel Files Here or Click to Browse",
        }
    }

    pub fn submit_caption(self) -> &'static str {
        match self {
            Mode::Single => "Convert to PDF",
            Mode::Batch => "Convert All to PDF",
        }
    }

    pub fn picker(self) -> PickerKind {
        match self {
            Mode::Single => PickerKind::OneFile,
            Mode::Batch => PickerKind::FilesOrFolder,
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            Mode::Single => "/convert",
            Mode::Batch => "/batch-convert",
        }
    }
}

#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(#[derivative(Debug = "ignore")] Arc<[u8]>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Bytes(bytes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub subtitle: String,
    pub report_date: String,
}

/// A fully built conversion request: which endpoint, which files under which
/// multipart key, and the text fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionRequest {
    Single {
        file: SelectedFile,
        title: String,
        subtitle: String,
        report_date: String,
    },
    Batch {
        files: Vec<SelectedFile>,
        subtitle: String,
        report_date: String,
    },
}

impl ConversionRequest {
    pub fn mode(&self) -> Mode {
        match self {
            ConversionRequest::Single { .. } => Mode::Single,
            ConversionRequest::Batch { .. } => Mode::Batch,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.mode().endpoint()
    }
}

#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct DownloadLink {
    pub file_name: String,
    pub label: &'static str,
    #[derivative(Debug = "ignore")]
    pub bytes: Arc<[u8]>,
}

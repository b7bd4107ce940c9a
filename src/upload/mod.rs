mod client;
mod file_processor;
mod types;

pub use client::ConversionClient;
pub use file_processor::{FileProcessor, ACCEPTED_EXTENSIONS};
pub use types::{
    ConversionRequest, DownloadLink, FormFields, Mode, PickerKind, SelectedFile,
};

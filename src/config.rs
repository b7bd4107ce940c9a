use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sheet-pdf-uploader", version, about = "Convert Excel/CSV sheets to PDF reports")]
pub struct Settings {
    /// Base URL of the conversion service.
    #[arg(long, env = "CONVERTER_SERVER_URL", default_value = "http://127.0.0.1:5000")]
    pub server_url: String,

    /// Folder the save dialog opens in.
    #[arg(long, env = "CONVERTER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

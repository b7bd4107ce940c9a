use crate::upload::types::{ConversionRequest, DownloadLink, FormFields, Mode, SelectedFile};
use ignore::WalkBuilder;
use std::path::Path;
use std::sync::Arc;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".xlsx", ".xls", ".csv"];

pub const BATCH_ARCHIVE_NAME: &str = "attendance_reports.zip";

pub struct FileProcessor;

impl FileProcessor {
    /// Case-sensitive suffix match, so `report.XLSX` is rejected.
    pub fn is_accepted(name: &str) -> bool {
        ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    }

    pub fn accepted(files: &[SelectedFile]) -> Vec<&SelectedFile> {
        files.iter().filter(|f| Self::is_accepted(&f.name)).collect()
    }

    fn stem(name: &str) -> Option<&str> {
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => None,
        }
    }

    pub fn title_from_filename(name: &str) -> String {
        Self::stem(name).unwrap_or(name).to_uppercase()
    }

    pub fn pdf_filename(name: &str) -> String {
        format!("{}.pdf", Self::stem(name).unwrap_or(name))
    }

    /// Every file below `folder`, hidden and ignored ones included, the way a
    /// directory input hands them over.
    pub fn collect_folder(folder: &Path) -> Vec<SelectedFile> {
        let mut files = Vec::new();
        for entry in WalkBuilder::new(folder).standard_filters(false).build() {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|t| t.is_file()) {
                        files.push(SelectedFile::from_path(entry.into_path()));
                    }
                }
                Err(e) => tracing::warn!("skipping unreadable entry in {}: {}", folder.display(), e),
            }
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        files
    }

    /// Builds the payload for `mode`. Batch keeps only accepted files; single
    /// sends the first selected file as-is.
    pub fn build_request(
        mode: Mode,
        selection: &[SelectedFile],
        fields: &FormFields,
    ) -> Option<ConversionRequest> {
        match mode {
            Mode::Single => selection.first().map(|file| ConversionRequest::Single {
                file: file.clone(),
                title: fields.title.clone(),
                subtitle: fields.subtitle.clone(),
                report_date: fields.report_date.clone(),
            }),
            Mode::Batch => {
                if selection.is_empty() {
                    return None;
                }
                Some(ConversionRequest::Batch {
                    files: Self::accepted(selection).into_iter().cloned().collect(),
                    subtitle: fields.subtitle.clone(),
                    report_date: fields.report_date.clone(),
                })
            }
        }
    }

    pub fn download_link(request: &ConversionRequest, bytes: Arc<[u8]>) -> DownloadLink {
        match request {
            ConversionRequest::Batch { .. } => DownloadLink {
                file_name: BATCH_ARCHIVE_NAME.to_string(),
                label: "📥 Download All PDFs (ZIP)",
                bytes,
            },
            ConversionRequest::Single { file, .. } => DownloadLink {
                file_name: Self::pdf_filename(&file.name),
                label: "📥 Download PDF",
                bytes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::types::FileSource;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, Arc::from(&b"x"[..]))
    }

    #[test]
    fn accepts_only_spreadsheet_suffixes() {
        for name in ["a.xlsx", "a.xls", "a.csv", "weird.name.csv", ".csv"] {
            assert!(FileProcessor::is_accepted(name), "{name}");
        }
        for name in ["a.XLSX", "a.Csv", "a.png", "xlsx", "a.xlsx.bak", "a.xlsm", ""] {
            assert!(!FileProcessor::is_accepted(name), "{name}");
        }
    }

    #[test]
    fn title_strips_final_extension_and_uppercases() {
        assert_eq!(FileProcessor::title_from_filename("Report.XLSX"), "REPORT");
        assert_eq!(FileProcessor::title_from_filename("north.branch.csv"), "NORTH.BRANCH");
        assert_eq!(FileProcessor::title_from_filename("nodot"), "NODOT");
        assert_eq!(FileProcessor::title_from_filename(".csv"), ".CSV");
    }

    #[test]
    fn pdf_filename_replaces_extension() {
        assert_eq!(FileProcessor::pdf_filename("Report.xlsx"), "Report.pdf");
        assert_eq!(FileProcessor::pdf_filename("a.b.csv"), "a.b.pdf");
        assert_eq!(FileProcessor::pdf_filename("nodot"), "nodot.pdf");
    }

    #[test]
    fn batch_request_filters_unaccepted_files() {
        let selection = vec![file("a.csv"), file("b.png"), file("c.xls")];
        let fields = FormFields {
            title: "ignored".into(),
            subtitle: "Weekly".into(),
            report_date: "2024-03-01".into(),
        };
        let request = FileProcessor::build_request(Mode::Batch, &selection, &fields).unwrap();
        match request {
            ConversionRequest::Batch { files, subtitle, report_date } => {
                let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["a.csv", "c.xls"]);
                assert_eq!(subtitle, "Weekly");
                assert_eq!(report_date, "2024-03-01");
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn single_request_sends_first_file_unfiltered() {
        let selection = vec![file("scan.png"), file("a.csv")];
        let fields = FormFields {
            title: "T".into(),
            ..Default::default()
        };
        let request = FileProcessor::build_request(Mode::Single, &selection, &fields).unwrap();
        assert_eq!(request.endpoint(), "/convert");
        match request {
            ConversionRequest::Single { file, title, .. } => {
                assert_eq!(file.name, "scan.png");
                assert_eq!(title, "T");
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn empty_selection_builds_nothing() {
        let fields = FormFields::default();
        assert!(FileProcessor::build_request(Mode::Single, &[], &fields).is_none());
        assert!(FileProcessor::build_request(Mode::Batch, &[], &fields).is_none());
    }

    #[test]
    fn download_names_follow_mode() {
        let bytes: Arc<[u8]> = Arc::from(&b"%PDF"[..]);
        let single = FileProcessor::build_request(
            Mode::Single,
            &[file("North.xlsx")],
            &FormFields::default(),
        )
        .unwrap();
        let link = FileProcessor::download_link(&single, bytes.clone());
        assert_eq!(link.file_name, "North.pdf");
        assert_eq!(link.label, "📥 Download PDF");

        let batch =
            FileProcessor::build_request(Mode::Batch, &[file("a.csv")], &FormFields::default())
                .unwrap();
        let link = FileProcessor::download_link(&batch, bytes);
        assert_eq!(link.file_name, "attendance_reports.zip");
    }

    #[test]
    fn folder_walk_includes_nested_and_hidden_files() {
        let dir = std::env::temp_dir().join(format!("sheet-walk-{}", std::process::id()));
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.csv"), "x").unwrap();
        fs::write(dir.join(".hidden.xlsx"), "x").unwrap();
        fs::write(dir.join("nested").join("a.xls"), "x").unwrap();

        let files = FileProcessor::collect_folder(&dir);
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![".hidden.xlsx", "a.xls", "b.csv"]);
        assert!(files
            .iter()
            .all(|f| matches!(&f.source, FileSource::Path(p) if p.starts_with(&dir))));

        fs::remove_dir_all(&dir).unwrap();
    }
}

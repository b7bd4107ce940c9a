use crate::error::ConvertError;
use crate::upload::types::{ConversionRequest, FileSource, SelectedFile};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

#[derive(Clone)]
pub struct ConversionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ConversionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, request: &ConversionRequest) -> String {
        format!("{}{}", self.base_url, request.endpoint())
    }

    /// Posts `request` and returns the converted body (PDF or ZIP).
    pub async fn convert(&self, request: &ConversionRequest) -> Result<Arc<[u8]>, ConvertError> {
        let form = Self::build_form(request).await?;
        let url = self.url_for(request);
        tracing::info!("POST {}", url);

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            tracing::info!("conversion succeeded ({} bytes)", body.len());
            return Ok(Arc::from(body.as_ref()));
        }

        let body = response.bytes().await?;
        let parsed: ErrorResponse = serde_json::from_slice(&body)?;
        let message = parsed.error.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
        tracing::warn!("conversion failed with status {}: {}", status, message);
        Err(ConvertError::Server(message))
    }

    async fn build_form(request: &ConversionRequest) -> Result<Form, ConvertError> {
        let form = match request {
            ConversionRequest::Single {
                file,
                title,
                subtitle,
                report_date,
            } => Form::new()
                .part("file", Self::file_part(file).await?)
                .text("title", title.clone())
                .text("subtitle", subtitle.clone())
                .text("report_date", report_date.clone()),
            ConversionRequest::Batch {
                files,
                subtitle,
                report_date,
            } => {
                let mut form = Form::new();
                for file in files {
                    form = form.part("files[]", Self::file_part(file).await?);
                }
                form.text("subtitle", subtitle.clone())
                    .text("report_date", report_date.clone())
            }
        };
        Ok(form)
    }

    async fn file_part(file: &SelectedFile) -> Result<Part, ConvertError> {
        let bytes = match &file.source {
            FileSource::Path(path) => tokio::fs::read(path).await?,
            FileSource::Bytes(bytes) => bytes.to_vec(),
        };
        Ok(Part::bytes(bytes).file_name(file.name.clone()))
    }
}

use crate::core::registry::ImageRecord;
use crate::service::types::AnalyzeResponse;
use crate::service::{AnalysisError, AnalysisService};
use crate::utils::constants::{FILES_FIELD, PROMPT_FIELD};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Instant;
use url::Url;

/// Posts images to the analysis backend as a multipart form: one `prompt`
/// text field followed by one `files` part per image, in registry order.
#[derive(Clone, Debug)]
pub struct HttpAnalysisClient {
    http_client: Client,
    api_url: Url,
}

impl HttpAnalysisClient {
    pub fn new(api_url: Url) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http_client: Client, api_url: Url) -> Self {
        Self {
            http_client,
            api_url,
        }
    }

    fn build_form(images: &[ImageRecord], prompt: &str) -> Result<Form, AnalysisError> {
        let mut form = Form::new().text(PROMPT_FIELD, prompt.to_string());
        for image in images {
            let part = Part::stream_with_length(image.content.clone(), image.size() as u64)
                .file_name(image.name.clone())
                .mime_str(&image.mime_type)?;
            form = form.part(FILES_FIELD, part);
        }
        Ok(form)
    }
}

impl AnalysisService for HttpAnalysisClient {
    async fn analyze(
        &self,
        images: &[ImageRecord],
        prompt: &str,
    ) -> Result<String, AnalysisError> {
        let start_time = Instant::now();
        let total_bytes: usize = images.iter().map(ImageRecord::size).sum();
        tracing::info!(
            url = %self.api_url,
            images = images.len(),
            total_bytes,
            "submitting images for analysis"
        );

        let form = Self::build_form(images, prompt)?;
        let response = self
            .http_client
            .post(self.api_url.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %error_text, "analysis request rejected");
            return Err(AnalysisError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: AnalyzeResponse = serde_json::from_slice(&body)?;
        tracing::info!(elapsed = ?start_time.elapsed(), "analysis completed");
        parsed.into_text()
    }
}

//! Client side of the remote analysis backend.

pub mod client;
pub mod types;

use crate::core::registry::ImageRecord;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Server error: {0}")]
    Status(reqwest::StatusCode),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unreadable analysis response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Analysis response contained no text")]
    EmptyResponse,
}

/// Sends the current images and prompt, returning the formatted result text.
pub trait AnalysisService {
    fn analyze(
        &self,
        images: &[ImageRecord],
        prompt: &str,
    ) -> impl Future<Output = Result<String, AnalysisError>>;
}

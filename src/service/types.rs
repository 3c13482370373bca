use crate::service::AnalysisError;
use serde::{Deserialize, Serialize};

// Response structure. `text` is the formatted answer; backends that only
// classify send `predictions` instead.
#[derive(Serialize, Debug, Deserialize, Clone, Default)]
pub struct AnalyzeResponse {
    pub text: Option<String>,
    pub predictions: Option<Vec<ImagePredictions>>,
}

#[derive(Serialize, Debug, Deserialize, Clone)]
pub struct ImagePredictions {
    pub image_index: usize,
    pub predictions: Vec<Prediction>,
}

#[derive(Serialize, Debug, Deserialize, Clone)]
pub struct Prediction {
    #[serde(rename = "class")]
    pub label: String,
    pub probability: f64,
}

impl AnalyzeResponse {
    pub fn into_text(self) -> Result<String, AnalysisError> {
        if let Some(text) = self.text {
            return Ok(text);
        }
        match self.predictions {
            Some(images) => Ok(format_predictions(&images)),
            None => Err(AnalysisError::EmptyResponse),
        }
    }
}

/// Formats top-k predictions as markup: one heading per image, one bullet
/// per class.
pub fn format_predictions(images: &[ImagePredictions]) -> String {
    images
        .iter()
        .map(|image| {
            let mut lines = vec![format!("## Image {}", image.image_index + 1)];
            lines.extend(image.predictions.iter().map(|prediction| {
                format!(
                    "* **{}**: {:.1}%",
                    prediction.label,
                    prediction.probability * 100.0
                )
            }));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

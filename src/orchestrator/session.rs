//! Session controller: turns user actions into registry and status changes
//! and runs the single analysis request.

use crate::core::markup::{self, Block};
use crate::core::preview::PreviewStore;
use crate::core::registry::{ImageFile, Registry};
use crate::core::status::{AnalysisState, AnalysisStatus};
use crate::service::AnalysisService;
use crate::utils::mime::is_image;
use uuid::Uuid;

pub struct Session<S> {
    registry: Registry,
    state: AnalysisState,
    prompt: String,
    service: S,
}

impl<S: AnalysisService> Session<S> {
    pub fn new(service: S, previews: PreviewStore, prompt: impl Into<String>) -> Self {
        Self {
            registry: Registry::new(previews),
            state: AnalysisState::new(),
            prompt: prompt.into(),
            service,
        }
    }

    /// Adds the image files among `files`; anything else is dropped
    /// silently. Returns the ids of the new records.
    pub fn select_images(&mut self, files: Vec<ImageFile>) -> Vec<Uuid> {
        let images: Vec<ImageFile> = files
            .into_iter()
            .filter(|file| {
                let keep = is_image(&file.mime_type);
                if !keep {
                    tracing::debug!(
                        name = %file.name,
                        mime = %file.mime_type,
                        "skipping non-image file"
                    );
                }
                keep
            })
            .collect();
        if images.is_empty() {
            return Vec::new();
        }

        let ids = self.registry.append(images);
        self.state.images_added();
        ids
    }

    pub fn remove_image(&mut self, id: &Uuid) -> bool {
        if self.state.is_busy() {
            tracing::warn!(%id, "ignoring removal while analysis is running");
            return false;
        }
        self.registry.remove(id)
    }

    /// Drops every image and any stored result or error.
    pub fn clear_all(&mut self) -> usize {
        if !self.state.reset() {
            tracing::warn!("ignoring clear while analysis is running");
            return 0;
        }
        self.registry.clear()
    }

    /// Submits the current images and prompt. A no-op when there are no
    /// images or a request is already running.
    pub async fn analyze(&mut self) -> AnalysisStatus {
        if !self.state.begin(self.registry.len()) {
            tracing::debug!(
                status = %self.state.status(),
                images = self.registry.len(),
                "analysis not started"
            );
            return self.state.status();
        }

        match self
            .service
            .analyze(self.registry.records(), &self.prompt)
            .await
        {
            Ok(text) => {
                self.state.succeed(text);
            }
            Err(err) => {
                tracing::warn!(error = %err, "analysis failed");
                self.state.fail(err.to_string());
            }
        }
        self.state.status()
    }

    pub async fn retry(&mut self) -> AnalysisStatus {
        self.analyze().await
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn rendered_result(&self) -> Option<Vec<Block>> {
        self.state.result().map(markup::render)
    }

    pub fn summary(&self) -> String {
        match self.registry.len() {
            0 => "No images selected".to_string(),
            1 => "1 image selected".to_string(),
            n => format!("{} images selected", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::BlockKind;
    use crate::core::registry::ImageRecord;
    use crate::service::AnalysisError;
    use bytes::Bytes;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedService {
        responses: Mutex<VecDeque<Result<String, AnalysisError>>>,
        calls: Mutex<Vec<(Vec<String>, String)>>,
    }

    impl ScriptedService {
        fn replying(responses: Vec<Result<String, AnalysisError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::default(),
            }
        }
    }

    impl AnalysisService for &ScriptedService {
        async fn analyze(
            &self,
            images: &[ImageRecord],
            prompt: &str,
        ) -> Result<String, AnalysisError> {
            let names = images.iter().map(|image| image.name.clone()).collect();
            self.calls.lock().unwrap().push((names, prompt.to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(AnalysisError::EmptyResponse))
        }
    }

    fn file(name: &str, mime: &str) -> ImageFile {
        ImageFile {
            name: name.to_string(),
            content: Bytes::from(name.as_bytes().to_vec()),
            mime_type: mime.to_string(),
        }
    }

    fn session(service: &ScriptedService) -> (Session<&ScriptedService>, PreviewStore) {
        let previews = PreviewStore::new();
        (
            Session::new(service, previews.clone(), "Identify the part"),
            previews,
        )
    }

    #[test]
    fn test_non_images_are_filtered() {
        let service = ScriptedService::default();
        let (mut session, previews) = session(&service);

        let ids = session.select_images(vec![
            file("a.jpg", "image/jpeg"),
            file("notes.txt", "text/plain"),
            file("b.webp", "image/webp"),
        ]);

        assert_eq!(ids.len(), 2);
        assert_eq!(session.registry().len(), 2);
        assert_eq!(previews.outstanding(), 2);
        assert_eq!(session.summary(), "2 images selected");
    }

    #[tokio::test]
    async fn test_empty_registry_does_not_submit() {
        let service = ScriptedService::replying(vec![Ok("unused".to_string())]);
        let (mut session, _) = session(&service);

        assert_eq!(session.analyze().await, AnalysisStatus::Idle);
        assert!(service.calls.lock().unwrap().is_empty());
        assert_eq!(session.summary(), "No images selected");
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let service =
            ScriptedService::replying(vec![Ok("## Title\n* **77** coupling".to_string())]);
        let (mut session, _) = session(&service);
        session.select_images(vec![file("a.jpg", "image/jpeg"), file("b.png", "image/png")]);

        assert_eq!(session.analyze().await, AnalysisStatus::Success);
        assert_eq!(session.state().result(), Some("## Title\n* **77** coupling"));
        assert!(session.state().error().is_none());

        let calls = service.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec!["a.jpg", "b.png"]);
        assert_eq!(calls[0].1, "Identify the part");
        drop(calls);

        let blocks = session.rendered_result().unwrap();
        assert_eq!(blocks[0].kind, BlockKind::Heading2);
        assert_eq!(blocks[1].kind, BlockKind::ListItem);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let service = ScriptedService::replying(vec![
            Err(AnalysisError::Status(reqwest::StatusCode::BAD_GATEWAY)),
            Ok("found it".to_string()),
        ]);
        let (mut session, _) = session(&service);
        session.select_images(vec![file("a.jpg", "image/jpeg")]);

        assert_eq!(session.analyze().await, AnalysisStatus::Error);
        assert_eq!(session.state().error(), Some("Server error: 502 Bad Gateway"));
        assert!(session.state().result().is_none());

        assert_eq!(session.retry().await, AnalysisStatus::Success);
        assert_eq!(session.state().result(), Some("found it"));
        assert!(session.state().error().is_none());
        assert_eq!(service.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_after_success_resets_status() {
        let service = ScriptedService::replying(vec![Ok("done".to_string())]);
        let (mut session, _) = session(&service);
        session.select_images(vec![file("a.jpg", "image/jpeg")]);
        session.analyze().await;

        session.select_images(vec![file("b.jpg", "image/jpeg")]);
        assert_eq!(session.state().status(), AnalysisStatus::Idle);
        assert!(session.state().result().is_none());
        assert_eq!(session.registry().len(), 2);
    }

    #[tokio::test]
    async fn test_filtered_out_upload_keeps_status() {
        let service = ScriptedService::replying(vec![Ok("done".to_string())]);
        let (mut session, _) = session(&service);
        session.select_images(vec![file("a.jpg", "image/jpeg")]);
        session.analyze().await;

        assert!(session.select_images(vec![file("a.pdf", "application/pdf")]).is_empty());
        assert_eq!(session.state().status(), AnalysisStatus::Success);
    }

    #[tokio::test]
    async fn test_clear_all_releases_previews_and_result() {
        let service = ScriptedService::replying(vec![Ok("done".to_string())]);
        let (mut session, previews) = session(&service);
        session.select_images(vec![
            file("a.jpg", "image/jpeg"),
            file("b.jpg", "image/jpeg"),
            file("c.jpg", "image/jpeg"),
        ]);
        session.analyze().await;

        assert_eq!(session.clear_all(), 3);
        assert!(session.registry().is_empty());
        assert_eq!(previews.stats().released, 3);
        assert_eq!(session.state().status(), AnalysisStatus::Idle);
        assert!(session.state().result().is_none());
    }

    #[test]
    fn test_remove_image() {
        let service = ScriptedService::default();
        let (mut session, previews) = session(&service);
        let ids =
            session.select_images(vec![file("a.jpg", "image/jpeg"), file("b.jpg", "image/jpeg")]);

        assert!(session.remove_image(&ids[0]));
        assert!(!session.remove_image(&ids[0]));
        assert_eq!(session.summary(), "1 image selected");
        assert_eq!(previews.stats().released, 1);
    }

    #[tokio::test]
    async fn test_prompt_is_sent_as_set() {
        let service = ScriptedService::replying(vec![Ok("ok".to_string())]);
        let (mut session, _) = session(&service);
        session.set_prompt("What size is this coupling?");
        session.select_images(vec![file("a.jpg", "image/jpeg")]);
        session.analyze().await;

        assert_eq!(
            service.calls.lock().unwrap()[0].1,
            "What size is this coupling?"
        );
    }
}

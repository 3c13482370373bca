//! Revocable preview handles for uploaded images.
//!
//! A [`PreviewStore`] plays the role of a browser's object-url table: it
//! maps `blob:lens/<uuid>` urls to the image bytes so a record can be
//! displayed without copying its payload. Each url is owned by exactly one
//! [`PreviewHandle`] and is revoked when that handle is dropped.

use crate::utils::constants::PREVIEW_URL_PREFIX;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewStats {
    pub allocated: u64,
    pub released: u64,
}

impl PreviewStats {
    pub fn outstanding(&self) -> u64 {
        self.allocated - self.released
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    blobs: HashMap<String, PreviewBlob>,
    stats: PreviewStats,
}

#[derive(Debug, Clone)]
pub struct PreviewBlob {
    pub content: Bytes,
    pub mime_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // the table stays consistent even if a holder panicked mid-lookup
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `content` under a fresh url and returns the owning handle.
    pub fn create(&self, content: Bytes, mime_type: &str) -> PreviewHandle {
        let url = format!("{}{}", PREVIEW_URL_PREFIX, Uuid::new_v4());
        let mut inner = self.lock();
        inner.blobs.insert(
            url.clone(),
            PreviewBlob {
                content,
                mime_type: mime_type.to_string(),
            },
        );
        inner.stats.allocated += 1;
        tracing::trace!(%url, "preview allocated");

        PreviewHandle {
            url,
            store: self.clone(),
        }
    }

    pub fn resolve(&self, url: &str) -> Option<PreviewBlob> {
        self.lock().blobs.get(url).cloned()
    }

    pub fn stats(&self) -> PreviewStats {
        self.lock().stats
    }

    pub fn outstanding(&self) -> usize {
        self.lock().blobs.len()
    }

    fn revoke(&self, url: &str) {
        let mut inner = self.lock();
        if inner.blobs.remove(url).is_some() {
            inner.stats.released += 1;
            tracing::trace!(%url, "preview released");
        } else {
            tracing::warn!(%url, "attempted to release an unknown preview url");
        }
    }
}

/// Owned preview url. Dropping the handle releases the url.
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    store: PreviewStore,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.store.revoke(&self.url);
    }
}

//! Ordered, in-memory list of uploaded images.
//!
//! The registry owns every record and, through it, the record's preview
//! handle. Removing a record or clearing the registry drops the handle,
//! which releases its preview url exactly once.

use crate::core::preview::{PreviewBlob, PreviewHandle, PreviewStore};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A file picked by the user, already read into memory.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub content: Bytes,
    pub mime_type: String,
}

#[derive(Debug)]
pub struct ImageRecord {
    pub id: Uuid,
    pub name: String,
    pub content: Bytes,
    pub mime_type: String,
    pub added_at: DateTime<Utc>,
    preview: PreviewHandle,
}

impl ImageRecord {
    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug)]
pub struct Registry {
    records: Vec<ImageRecord>,
    previews: PreviewStore,
}

impl Registry {
    pub fn new(previews: PreviewStore) -> Self {
        Self {
            records: Vec::new(),
            previews,
        }
    }

    /// Appends one record per file, in input order, and returns the new ids.
    /// Content is not inspected; callers filter non-image files first.
    pub fn append(&mut self, files: impl IntoIterator<Item = ImageFile>) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for file in files {
            let preview = self.previews.create(file.content.clone(), &file.mime_type);
            let record = ImageRecord {
                id: Uuid::new_v4(),
                name: file.name,
                content: file.content,
                mime_type: file.mime_type,
                added_at: Utc::now(),
                preview,
            };
            debug_assert!(self.get(&record.id).is_none());
            tracing::debug!(id = %record.id, name = %record.name, "image added");
            ids.push(record.id);
            self.records.push(record);
        }
        ids
    }

    /// Removes the record with `id`, releasing its preview. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        match self.records.iter().position(|record| record.id == *id) {
            Some(index) => {
                let record = self.records.remove(index);
                tracing::debug!(id = %record.id, name = %record.name, "image removed");
                true
            }
            None => false,
        }
    }

    /// Releases every preview, then empties the registry. Returns how many
    /// records were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.drain(..).count();
        if removed > 0 {
            tracing::debug!(removed, "registry cleared");
        }
        removed
    }

    pub fn get(&self, id: &Uuid) -> Option<&ImageRecord> {
        self.records.iter().find(|record| record.id == *id)
    }

    /// Looks up the preview backing `record` in the store. `None` once the
    /// url has been released.
    pub fn preview(&self, record: &ImageRecord) -> Option<PreviewBlob> {
        self.previews.resolve(record.preview_url())
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

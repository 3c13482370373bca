use crate::core::registry::ImageFile;
use crate::utils::mime::declared_mime;
use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct LoadReport {
    pub files: Vec<ImageFile>,
    pub failures: Vec<(PathBuf, io::Error)>,
}

/// Reads every path into memory, in order. The declared type comes from
/// the extension; unreadable paths are collected instead of aborting.
pub async fn load_files(paths: &[PathBuf]) -> LoadReport {
    let mut report = LoadReport::default();
    for path in paths {
        match tokio::fs::read(path).await {
            Ok(content) => report.files.push(ImageFile {
                name: display_name(path),
                content: Bytes::from(content),
                mime_type: declared_mime(path),
            }),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "failed to read file");
                report.failures.push((path.clone(), err));
            }
        }
    }
    report
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

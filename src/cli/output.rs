// Terminal formatting for session output and rendered results

use crate::core::markup::{Block, BlockKind, Span};
use crate::core::preview::PreviewBlob;
use crate::core::registry::ImageRecord;
use crate::core::status::AnalysisState;
use crate::core::status::AnalysisStatus;
use colored::Colorize;

const BULLET: &str = "  • ";

pub struct OutputStyle {
    pub use_colors: bool,
}

impl OutputStyle {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }

    pub fn info(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ℹ".blue(), msg)
        } else {
            format!("ℹ {}", msg)
        }
    }

    fn span(&self, span: &Span) -> String {
        match span {
            Span::Strong(text) if self.use_colors => text.bold().to_string(),
            other => other.text().to_string(),
        }
    }

    fn spans(&self, spans: &[Span]) -> String {
        spans.iter().map(|span| self.span(span)).collect()
    }

    /// One output line per block.
    pub fn blocks(&self, blocks: &[Block]) -> String {
        let mut lines = Vec::with_capacity(blocks.len());
        for block in blocks {
            let text = self.spans(&block.spans);
            let line = match block.kind {
                BlockKind::Heading2 if self.use_colors => text.bold().underline().to_string(),
                BlockKind::Heading3 if self.use_colors => text.bold().to_string(),
                BlockKind::Heading2 | BlockKind::Heading3 => text,
                BlockKind::ListItem => format!("{}{}", BULLET, text),
                BlockKind::Paragraph if block.is_spacer() => String::new(),
                BlockKind::Paragraph => text,
            };
            lines.push(line);
        }
        lines.join("\n")
    }

    /// One listing line. The preview part comes from the preview store so a
    /// released url shows up as such.
    pub fn record(&self, record: &ImageRecord, preview: Option<&PreviewBlob>) -> String {
        let id = record.id.to_string();
        let short_id = &id[..8];
        let short_id = if self.use_colors {
            short_id.cyan().to_string()
        } else {
            short_id.to_string()
        };
        let preview = match preview {
            Some(blob) => format!(
                "{} ({}, {} bytes)",
                record.preview_url(),
                blob.mime_type,
                blob.content.len()
            ),
            None if self.use_colors => "preview released".red().to_string(),
            None => "preview released".to_string(),
        };
        format!(
            "{}  {}  {}  {}",
            short_id,
            record.name,
            record.added_at.format("%H:%M:%S"),
            preview
        )
    }

    pub fn status(&self, state: &AnalysisState) -> String {
        match state.status() {
            AnalysisStatus::Idle => self.info("Ready to analyze"),
            AnalysisStatus::Analyzing => self.info("Analyzing..."),
            AnalysisStatus::Success => self.success("Analysis complete"),
            AnalysisStatus::Error => self.error(&format!(
                "Analysis failed: {} (type `retry` to try again)",
                state.error().unwrap_or("unknown error")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::render;

    #[test]
    fn test_plain_blocks() {
        let style = OutputStyle::new(false);
        let blocks = render("## Result\n* **Style 77** coupling\n\nSee the **groove**.");

        assert_eq!(
            style.blocks(&blocks),
            "Result\n  • Style 77 coupling\n\nSee the groove."
        );
    }

    #[test]
    fn test_colored_blocks_mark_emphasis() {
        colored::control::set_override(true);
        let style = OutputStyle::new(true);
        let out = style.blocks(&render("a **b** c"));

        assert!(out.contains("\u{1b}["));
        assert!(out.contains('b'));
        assert!(!out.contains("**"));
    }

    #[test]
    fn test_record_line_reads_the_preview_store() {
        use crate::core::preview::PreviewStore;
        use crate::core::registry::{ImageFile, Registry};
        use bytes::Bytes;

        let style = OutputStyle::new(false);
        let mut registry = Registry::new(PreviewStore::new());
        registry.append(vec![ImageFile {
            name: "front.png".to_string(),
            content: Bytes::from_static(b"\x89PNG"),
            mime_type: "image/png".to_string(),
        }]);
        let record = &registry.records()[0];

        let blob = registry.preview(record);
        let line = style.record(record, blob.as_ref());
        assert!(line.starts_with(&record.id.to_string()[..8]));
        assert!(line.contains("front.png"));
        let expected = format!("{} (image/png, 4 bytes)", record.preview_url());
        assert!(line.ends_with(&expected));

        let released = style.record(record, None);
        assert!(released.ends_with("preview released"));
        assert!(!released.contains(record.preview_url()));
    }

    #[test]
    fn test_error_status_mentions_retry() {
        let style = OutputStyle::new(false);
        let mut state = AnalysisState::new();
        state.begin(1);
        state.fail("Server error: 503 Service Unavailable".to_string());

        assert_eq!(
            style.status(&state),
            "✗ Analysis failed: Server error: 503 Service Unavailable (type `retry` to try again)"
        );
    }
}

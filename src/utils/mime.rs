use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type declared by the file's extension.
pub fn declared_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

pub fn is_image(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_mime() {
        assert_eq!(declared_mime(Path::new("part.jpg")), "image/jpeg");
        assert_eq!(declared_mime(Path::new("PART.PNG")), "image/png");
        assert_eq!(declared_mime(Path::new("scan.webp")), "image/webp");
        assert_eq!(declared_mime(Path::new("notes.txt")), "text/plain");
        assert_eq!(declared_mime(Path::new("no_extension")), OCTET_STREAM);
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("image/jpeg"));
        assert!(is_image("image/svg+xml"));
        assert!(!is_image("text/plain"));
        assert!(!is_image(OCTET_STREAM));
        assert!(!is_image(""));
    }
}

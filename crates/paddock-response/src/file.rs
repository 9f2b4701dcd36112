//! File payloads.

use bytes::Bytes;
use paddock_core::ResourceError;
use std::path::Path;

/// A named byte stream sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    name: String,
    content: Bytes,
}

impl FilePayload {
    /// Creates a payload from a file name and its content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Reads a file from disk. The payload is named after the file.
    ///
    /// # Errors
    ///
    /// Any I/O failure is reported as [`ResourceError::FileNotFound`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match std::fs::read(path) {
            Ok(content) => Ok(Self::new(name, content)),
            Err(err) => Err(ResourceError::file_not_found(
                path.display().to_string(),
                Some(err),
            )),
        }
    }

    /// Returns the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Returns the content type guessed from the file extension.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        content_type_for(&self.name)
    }

    /// Consumes the payload, returning its content.
    #[must_use]
    pub fn into_content(self) -> Bytes {
        self.content
    }
}

/// Guesses a content type from a file name's extension.
#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        // Text
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" => "text/plain; charset=utf-8",
        "csv" => "text/csv; charset=utf-8",
        "md" => "text/markdown; charset=utf-8",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",

        // Documents
        "pdf" => "application/pdf",
        "epub" => "application/epub+zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",

        // Media
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("report.pdf"), "application/pdf");
        assert_eq!(content_type_for("COVER.JPG"), "image/jpeg");
        assert_eq!(content_type_for("books.csv"), "text/csv; charset=utf-8");
        assert_eq!(content_type_for("noextension"), "application/octet-stream");
    }

    #[test]
    fn test_open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"dune\n").unwrap();

        let payload = FilePayload::open(&path).unwrap();

        assert_eq!(payload.name(), "catalog.txt");
        assert_eq!(payload.content().as_ref(), b"dune\n");
        assert_eq!(payload.content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let err = FilePayload::open(dir.path().join("missing.pdf")).unwrap_err();

        assert!(matches!(err, ResourceError::FileNotFound { .. }));
        assert_eq!(err.status_code(), http::StatusCode::NOT_FOUND);
    }
}

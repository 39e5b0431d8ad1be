//! File payload adapter: base64 codec, the composite file-type registry,
//! and download writes that never leave partial artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;
use tracing::info;

use crate::api::{DownloadPayload, UploadRequest};
use crate::auth::Identity;

/// Recognized extensions and their native MIME types. The on-wire type
/// identifier is the concatenation `mime.extension`, which the whole
/// system (backend included) uses as the canonical display tag.
const FILE_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("pdf", "application/pdf"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
];

#[derive(Debug, Error)]
pub enum TransferError {
    /// Client-side policy refusal; never reaches the network.
    #[error("unsupported file type: .{0}")]
    UnsupportedFileType(String),
    #[error("payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Composite on-wire tag for a recognized extension, e.g.
/// `application/pdf.pdf` for `pdf`.
pub fn composite_tag(extension: &str) -> Option<String> {
    let extension = extension.to_ascii_lowercase();
    FILE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(ext, mime)| format!("{mime}.{ext}"))
}

/// Extension portion of a composite tag (the segment after the last dot).
pub fn extension_of(tag: &str) -> Option<&str> {
    tag.rsplit('.').next().filter(|ext| !ext.is_empty())
}

/// Short display name for a composite tag, or "unknown" when the tag is
/// not in the registry.
pub fn display_name(tag: &str) -> &str {
    FILE_TYPES
        .iter()
        .find(|(ext, mime)| tag == format!("{mime}.{ext}"))
        .map(|(ext, _)| *ext)
        .unwrap_or("unknown")
}

/// Read a local file and build the upload body. An unrecognized extension
/// is rejected here, before any network call, and the file stays out of
/// the submission.
pub fn build_upload(path: &Path, identity: &Identity) -> Result<UploadRequest, TransferError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let file_type = composite_tag(&extension)
        .ok_or_else(|| TransferError::UnsupportedFileType(extension.clone()))?;

    let bytes = fs::read(path)?;
    Ok(UploadRequest {
        owner_id: identity.user_id.clone(),
        file_type,
        size: bytes.len() as u64,
        base64_content: STANDARD.encode(&bytes),
    })
}

/// Decode a downloaded payload and write it as `doc-{id}.{ext}` under
/// `dir`. Returns the path written.
pub fn save_document(
    dir: &Path,
    id: u64,
    payload: &DownloadPayload,
) -> Result<PathBuf, TransferError> {
    let bytes = STANDARD.decode(&payload.base64_content)?;
    let extension = extension_of(&payload.file_type).unwrap_or("bin");
    let path = dir.join(format!("doc-{id}.{extension}"));
    write_atomic(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "saved document");
    Ok(path)
}

/// Write a backend-built archive as-is. No client-side bundling happens:
/// the zip arrives ready from `POST /documents/download/zip`.
pub fn save_archive(dir: &Path, bytes: &[u8]) -> Result<PathBuf, TransferError> {
    let path = dir.join("documents.zip");
    write_atomic(&path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "saved archive");
    Ok(path)
}

/// Write through a sibling temp file and rename, so an interrupted write
/// never leaves a half-written artifact at the target path.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("part");
    if let Err(e) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_tag_pairs_mime_and_extension() {
        assert_eq!(composite_tag("pdf").unwrap(), "application/pdf.pdf");
        assert_eq!(composite_tag("PNG").unwrap(), "image/png.png");
        assert!(composite_tag("exe").is_none());
    }

    #[test]
    fn extension_recovered_from_tag() {
        assert_eq!(extension_of("application/pdf.pdf"), Some("pdf"));
        assert_eq!(
            extension_of(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.docx"
            ),
            Some("docx")
        );
        assert_eq!(extension_of(""), None);
    }

    #[test]
    fn display_name_for_known_and_unknown_tags() {
        assert_eq!(display_name("image/jpeg.jpg"), "jpg");
        assert_eq!(display_name("application/x-evil.exe"), "unknown");
    }

    #[test]
    fn build_upload_encodes_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, b"hello").unwrap();

        let identity = Identity {
            user_id: "42".to_string(),
            user_name: "alice".to_string(),
        };
        let req = build_upload(&path, &identity).unwrap();
        assert_eq!(req.owner_id, "42");
        assert_eq!(req.file_type, "text/plain.txt");
        assert_eq!(req.size, 5);
        assert_eq!(req.base64_content, "aGVsbG8=");
    }

    #[test]
    fn unsupported_extension_rejected_before_any_io() {
        let identity = Identity::default();
        let err = build_upload(Path::new("/nonexistent/tool.exe"), &identity).unwrap_err();
        // Policy refusal, not a file-not-found: the registry check runs first.
        assert!(matches!(err, TransferError::UnsupportedFileType(ext) if ext == "exe"));
    }

    #[test]
    fn save_document_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let payload = DownloadPayload {
            base64_content: "aGVsbG8=".to_string(),
            file_type: "text/plain.txt".to_string(),
        };
        let path = save_document(dir.path(), 17, &payload).unwrap();
        assert_eq!(path.file_name().unwrap(), "doc-17.txt");
        assert_eq!(fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn corrupt_base64_leaves_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let payload = DownloadPayload {
            base64_content: "!!not-base64!!".to_string(),
            file_type: "text/plain.txt".to_string(),
        };
        let err = save_document(dir.path(), 9, &payload).unwrap_err();
        assert!(matches!(err, TransferError::Decode(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_archive_writes_bytes_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_archive(dir.path(), b"PK\x03\x04payload").unwrap();
        assert_eq!(path.file_name().unwrap(), "documents.zip");
        assert!(fs::read(&path).unwrap().starts_with(b"PK"));
    }
}

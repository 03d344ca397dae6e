//! Input resolution: normalise a user-supplied path or URL to PDF bytes.
//!
//! Validation order matters and is observable: the size limit is checked
//! before the magic bytes, and both before any parse attempt, so an
//! oversized file is rejected with the size-limit message without the
//! extractor ever running.

use crate::error::StudyError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Upload limit for a PDF, in bytes (50 MiB).
pub const MAX_PDF_BYTES: u64 = 50 * 1024 * 1024;

const LIMIT_MIB: u64 = MAX_PDF_BYTES / (1024 * 1024);

/// The resolved input: raw PDF bytes plus a display name.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    /// File name or URL tail, for display and the `Document` record.
    pub name: String,
    /// The raw PDF bytes, already size- and magic-checked.
    pub bytes: Vec<u8>,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Reject byte counts above [`MAX_PDF_BYTES`].
pub fn ensure_within_size(path: &Path, size: u64) -> Result<(), StudyError> {
    if size > MAX_PDF_BYTES {
        return Err(StudyError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit_mib: LIMIT_MIB,
        });
    }
    Ok(())
}

/// Reject content that does not start with the `%PDF` magic.
fn ensure_pdf_magic(path: &Path, bytes: &[u8]) -> Result<(), StudyError> {
    let mut magic = [0u8; 4];
    let n = bytes.len().min(4);
    magic[..n].copy_from_slice(&bytes[..n]);
    if &magic != b"%PDF" {
        return Err(StudyError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }
    Ok(())
}

/// Resolve the input string to validated PDF bytes.
///
/// If the input is a URL, download it (bounded by `timeout_secs`).
/// If the input is a local file, validate it exists and is readable.
/// Either way the size limit is enforced before the magic-byte check.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<ResolvedInput, StudyError> {
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        resolve_local(input).await
    }
}

/// Read a local file, validating existence, size, and PDF magic bytes.
async fn resolve_local(path_str: &str) -> Result<ResolvedInput, StudyError> {
    let path = PathBuf::from(path_str);

    let meta = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(StudyError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(StudyError::FileNotFound { path });
        }
    };
    if !meta.is_file() {
        return Err(StudyError::InvalidInput {
            input: path_str.to_string(),
        });
    }

    // Size first: an oversized file must never be read or parsed.
    ensure_within_size(&path, meta.len())?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(StudyError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(StudyError::FileNotFound { path });
        }
    };

    ensure_pdf_magic(&path, &bytes)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_str.to_string());

    debug!("Resolved local PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(ResolvedInput { name, bytes })
}

/// Download a URL and validate the body as for a local file.
async fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedInput, StudyError> {
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| StudyError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| StudyError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(StudyError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    if let Some(len) = response.content_length() {
        ensure_within_size(Path::new(url), len)?;
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| StudyError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?
        .to_vec();

    ensure_within_size(Path::new(url), bytes.len() as u64)?;
    ensure_pdf_magic(Path::new(url), &bytes)?;

    let name = extract_filename(url);
    info!("Downloaded {} ({} bytes)", name, bytes.len());

    Ok(ResolvedInput { name, bytes })
}

/// Extract a reasonable display name from the URL path.
fn extract_filename(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() {
                    return last.to_string();
                }
            }
        }
    }
    "document.pdf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.pdf"));
        assert!(is_url("http://example.com/doc.pdf"));
        assert!(!is_url("/tmp/doc.pdf"));
        assert!(!is_url("doc.pdf"));
        assert!(!is_url(""));
    }

    #[test]
    fn size_check_boundaries() {
        let p = Path::new("doc.pdf");
        assert!(ensure_within_size(p, 0).is_ok());
        assert!(ensure_within_size(p, MAX_PDF_BYTES).is_ok());
        let err = ensure_within_size(p, MAX_PDF_BYTES + 1).unwrap_err();
        assert!(matches!(err, StudyError::FileTooLarge { .. }));
    }

    #[tokio::test]
    async fn rejects_missing_file() {
        let err = resolve_input("/no/such/file.pdf", 5).await.unwrap_err();
        assert!(matches!(err, StudyError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn rejects_non_pdf_content() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"PK\x03\x04 definitely a zip").unwrap();
        let err = resolve_input(f.path().to_str().unwrap(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::NotAPdf { .. }));
    }

    #[tokio::test]
    async fn oversized_pdf_is_rejected_before_any_read() {
        // Sparse 60 MiB file with a valid PDF magic: the size limit must
        // fire first, so the magic is never even inspected.
        let f = tempfile::NamedTempFile::new().unwrap();
        {
            let mut handle = f.reopen().unwrap();
            handle.write_all(b"%PDF-1.7").unwrap();
            handle.set_len(60 * 1024 * 1024).unwrap();
        }
        let err = resolve_input(f.path().to_str().unwrap(), 5)
            .await
            .unwrap_err();
        match err {
            StudyError::FileTooLarge { size, limit_mib, .. } => {
                assert_eq!(size, 60 * 1024 * 1024);
                assert_eq!(limit_mib, 50);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn accepts_small_valid_pdf_bytes() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.4\n%stub").unwrap();
        let resolved = resolve_input(f.path().to_str().unwrap(), 5).await.unwrap();
        assert!(resolved.bytes.starts_with(b"%PDF"));
        assert!(!resolved.name.is_empty());
    }

    #[test]
    fn filename_from_url() {
        assert_eq!(
            extract_filename("https://example.com/papers/attention.pdf"),
            "attention.pdf"
        );
        assert_eq!(extract_filename("https://example.com/"), "document.pdf");
    }
}

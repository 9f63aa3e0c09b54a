//! Loading report text from disk.

use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Read the text of a report.
///
/// `.pdf` files go through the PDF text extractor; anything else is read as
/// UTF-8 text. A PDF whose text cannot be extracted yields an empty string so
/// the caller reports it as an empty document.
pub fn load_text(path: &Path) -> Result<String> {
    if is_pdf(path) {
        let bytes = fs::read(path)?;
        Ok(pdf_text(&bytes))
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Extract text from PDF bytes, or "" on failure.
pub fn pdf_text(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => {
            debug!("Extracted {} chars of PDF text", text.len());
            text
        }
        Err(e) => {
            error!("Error extracting text from PDF: {}", e);
            String::new()
        }
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        fs::write(&path, "Application#: 123 Nice Classes: 9").unwrap();

        assert_eq!(
            load_text(&path).unwrap(),
            "Application#: 123 Nice Classes: 9"
        );
    }

    #[test]
    fn test_pdf_extension_is_case_insensitive() {
        assert!(is_pdf(Path::new("Report.PDF")));
        assert!(is_pdf(Path::new("report.pdf")));
        assert!(!is_pdf(Path::new("report.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_unreadable_pdf_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not a pdf at all").unwrap();

        assert_eq!(load_text(&path).unwrap(), "");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_text(&dir.path().join("absent.txt")).is_err());
    }
}

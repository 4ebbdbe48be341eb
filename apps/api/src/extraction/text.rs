//! Raw text extraction from uploaded files. The rest of the system only
//! ever sees plain text; file formats stop here.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Txt,
}

impl ResumeFormat {
    /// Resolves the declared format from the uploaded filename extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(ResumeFormat::Pdf),
            "docx" | "doc" => Some(ResumeFormat::Docx),
            "txt" => Some(ResumeFormat::Txt),
            _ => None,
        }
    }
}

/// Extracts plain text from file bytes for the declared format.
///
/// PDF parsing failures surface as `CorruptFile`. DOCX is rejected with
/// `UnsupportedFormat`: there is no in-process extraction path for it in
/// this stack, so callers should convert to PDF or TXT first.
pub fn extract_text(bytes: &[u8], format: ResumeFormat) -> Result<String, AppError> {
    match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::CorruptFile(format!("failed to read PDF: {e}"))),
        ResumeFormat::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
        ResumeFormat::Docx => Err(AppError::UnsupportedFormat(
            "DOCX extraction is not supported; upload PDF or TXT".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(ResumeFormat::from_filename("cv.pdf"), Some(ResumeFormat::Pdf));
        assert_eq!(ResumeFormat::from_filename("CV.PDF"), Some(ResumeFormat::Pdf));
        assert_eq!(ResumeFormat::from_filename("cv.docx"), Some(ResumeFormat::Docx));
        assert_eq!(ResumeFormat::from_filename("cv.txt"), Some(ResumeFormat::Txt));
        assert_eq!(ResumeFormat::from_filename("cv.png"), None);
    }

    #[test]
    fn test_txt_extraction() {
        let text = extract_text(b"plain resume text", ResumeFormat::Txt).unwrap();
        assert_eq!(text, "plain resume text");
    }

    #[test]
    fn test_txt_extraction_tolerates_invalid_utf8() {
        let text = extract_text(&[0x66, 0x6f, 0xff, 0x6f], ResumeFormat::Txt).unwrap();
        assert!(text.starts_with("fo"));
    }

    #[test]
    fn test_docx_is_unsupported() {
        let err = extract_text(b"PK...", ResumeFormat::Docx).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_garbage_pdf_is_corrupt() {
        let err = extract_text(b"definitely not a pdf", ResumeFormat::Pdf).unwrap_err();
        assert!(matches!(err, AppError::CorruptFile(_)));
    }
}

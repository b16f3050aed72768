use std::panic::{self, AssertUnwindSafe};

use super::error::IntakeError;

/// Turns uploaded PDF bytes into the document's text stream.
pub trait PdfTextSource: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IntakeError>;
}

/// [`PdfTextSource`] backed by `pdf-extract`.
///
/// The decoder panics on some malformed documents, so calls run behind
/// `catch_unwind` and a panic is reported as a decode failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractSource;

impl PdfTextSource for PdfExtractSource {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IntakeError> {
        let result =
            panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));
        match result {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => Err(IntakeError::Decode(format!("pdf extraction failed: {err}"))),
            Err(_) => Err(IntakeError::Decode(
                "pdf extraction panicked (malformed document)".to_string(),
            )),
        }
    }
}

use mime::Mime;

use super::error::IntakeError;

/// An application-form file as received from a client.
#[derive(Debug, Clone)]
pub struct UploadedForm {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedForm {
    pub fn pdf(bytes: Vec<u8>) -> Self {
        Self {
            file_name: None,
            content_type: Some(mime::APPLICATION_PDF.to_string()),
            bytes,
        }
    }
}

/// Accepts PDF uploads up to a byte limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: usize,
}

impl UploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn check(&self, upload: &UploadedForm) -> Result<(), IntakeError> {
        let declared = upload.content_type.as_deref().unwrap_or("");
        let is_pdf = declared
            .parse::<Mime>()
            .map(|parsed| parsed.essence_str() == mime::APPLICATION_PDF.essence_str())
            .unwrap_or(false);
        if !is_pdf {
            let received = if declared.is_empty() {
                "no content type".to_string()
            } else {
                declared.to_string()
            };
            return Err(IntakeError::UnsupportedMediaType(received));
        }

        if upload.bytes.len() > self.max_bytes {
            return Err(IntakeError::PayloadTooLarge {
                limit: self.max_bytes,
            });
        }

        Ok(())
    }
}

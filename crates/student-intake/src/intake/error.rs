use axum::http::StatusCode;

/// Message shown when an upload cannot be turned into text.
pub const UNABLE_TO_PARSE: &str = "Unable to parse the PDF file. Please ensure the file is a valid PDF and contains readable text. You can manually fill out the form instead.";

/// Error raised while accepting or decoding an application-form upload.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("No PDF file was uploaded. Please select a PDF file to upload.")]
    MissingFile,
    #[error("Only PDF files are allowed (received {0}).")]
    UnsupportedMediaType(String),
    #[error("The uploaded file exceeds the {limit} byte limit.")]
    PayloadTooLarge { limit: usize },
    #[error("The upload could not be read: {0}")]
    InvalidUpload(String),
    #[error("{}", UNABLE_TO_PARSE)]
    Decode(String),
    #[error("{}", UNABLE_TO_PARSE)]
    NoText,
}

impl IntakeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::MissingFile | IntakeError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            IntakeError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            IntakeError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            IntakeError::Decode(_) | IntakeError::NoText => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

use std::sync::Arc;

use tracing::{debug, warn};

use super::engine::ApplicationFormExtractor;
use super::error::IntakeError;
use super::normalizer::truncate_chars;
use super::pdf::PdfTextSource;
use super::record::{PartialRecord, StudentField};
use super::upload::{UploadPolicy, UploadedForm};
use crate::config::IntakeConfig;

/// Service composing the upload policy, PDF decoding and field extraction.
pub struct ApplicationIntakeService<S> {
    source: Arc<S>,
    policy: UploadPolicy,
    max_text_chars: usize,
    extractor: &'static ApplicationFormExtractor,
}

impl<S> ApplicationIntakeService<S>
where
    S: PdfTextSource + 'static,
{
    pub fn new(source: Arc<S>, config: IntakeConfig) -> Self {
        Self {
            source,
            policy: UploadPolicy::new(config.max_upload_bytes),
            max_text_chars: config.max_text_chars,
            extractor: ApplicationFormExtractor::standard(),
        }
    }

    pub fn policy(&self) -> UploadPolicy {
        self.policy
    }

    /// Validates and decodes an uploaded form, returning the pre-fill record
    /// for human review.
    ///
    /// The uploaded document is itself the application form, so
    /// `applicationFormCollected` is always set on success.
    pub fn ingest(&self, upload: &UploadedForm) -> Result<PartialRecord, IntakeError> {
        self.policy.check(upload)?;

        let text = self.source.extract_text(&upload.bytes).map_err(|err| {
            warn!(
                file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
                error = ?err,
                "application form could not be decoded"
            );
            err
        })?;

        if text.trim().is_empty() {
            warn!(
                file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
                "application form has no extractable text"
            );
            return Err(IntakeError::NoText);
        }

        let mut record = self.extract_text(&text);
        record.insert_flag(StudentField::ApplicationFormCollected, true);
        Ok(record)
    }

    /// Runs extraction on already-decoded text, applying the text size cap.
    pub fn extract_text(&self, text: &str) -> PartialRecord {
        let bounded = truncate_chars(text, self.max_text_chars);
        if bounded.len() < text.len() {
            warn!(
                limit = self.max_text_chars,
                dropped_bytes = text.len() - bounded.len(),
                "application form text truncated before extraction"
            );
        }

        let record = self.extractor.extract(bounded);
        debug!(
            fields = record.len(),
            text_bytes = bounded.len(),
            "application form extracted"
        );
        record
    }
}

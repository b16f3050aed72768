//! Admissions application-form intake.
//!
//! Uploaded PDFs are decoded to text, and a set of label heuristics turns the
//! text into a sparse student record that pre-fills the data-entry form. The
//! record is advisory: staff review and correct it before anything is saved.

mod dates;
mod engine;
mod error;
mod keywords;
mod normalizer;
mod patterns;
mod pdf;
mod record;
pub mod router;
mod service;
mod upload;

pub use dates::try_parse_date;
pub use engine::{extract, ApplicationFormExtractor};
pub use error::{IntakeError, UNABLE_TO_PARSE};
pub use keywords::{Keyword, PartnerMatch, PartnerPrograms};
pub use patterns::{
    extract_array, extract_date, extract_discriminated_list, extract_field, LabelChain,
    LabelPattern, MAX_LIST_ITEM_CHARS,
};
pub use pdf::{PdfExtractSource, PdfTextSource};
pub use record::{FieldValue, PartialRecord, StudentField};
pub use router::intake_router;
pub use service::ApplicationIntakeService;
pub use upload::{UploadPolicy, UploadedForm};

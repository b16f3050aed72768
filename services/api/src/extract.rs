use clap::Args;
use mime_guess::mime;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use student_intake::config::AppConfig;
use student_intake::error::AppError;
use student_intake::intake::{
    ApplicationIntakeService, IntakeError, PartialRecord, PdfExtractSource, PdfTextSource,
    UploadedForm,
};

#[derive(Args, Debug)]
pub(crate) struct ExtractArgs {
    /// Application form to read (.pdf, or a plain-text dump such as .txt)
    pub(crate) path: PathBuf,
    /// Pretty-print the JSON record
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = ApplicationIntakeService::new(Arc::new(PdfExtractSource), config.intake);

    let record = extract_from_path(&service, &args.path)?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{rendered}");

    Ok(())
}

/// PDFs go through the full upload path; text files skip decoding.
pub(crate) fn extract_from_path<S>(
    service: &ApplicationIntakeService<S>,
    path: &Path,
) -> Result<PartialRecord, AppError>
where
    S: PdfTextSource + 'static,
{
    let guessed = mime_guess::from_path(path).first_or_octet_stream();

    if guessed.essence_str() == mime::APPLICATION_PDF.essence_str() {
        let upload = UploadedForm {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            content_type: Some(guessed.essence_str().to_string()),
            bytes: std::fs::read(path)?,
        };
        return Ok(service.ingest(&upload)?);
    }

    if guessed.type_() == mime::TEXT {
        let text = std::fs::read_to_string(path)?;
        return Ok(service.extract_text(&text));
    }

    Err(IntakeError::UnsupportedMediaType(guessed.essence_str().to_string()).into())
}

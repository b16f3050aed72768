use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::error::IntakeError;
use super::pdf::PdfTextSource;
use super::service::ApplicationIntakeService;
use super::upload::UploadedForm;

/// Multipart field carrying the PDF.
pub const UPLOAD_FIELD: &str = "file";

// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 16 * 1024;

/// Router builder exposing the application-form parsing endpoint.
pub fn intake_router<S>(service: Arc<ApplicationIntakeService<S>>) -> Router
where
    S: PdfTextSource + 'static,
{
    let body_limit = service
        .policy()
        .max_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            "/api/v1/students/parse-application",
            post(parse_application_handler::<S>),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(service)
}

pub(crate) async fn parse_application_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
    multipart: Multipart,
) -> Response
where
    S: PdfTextSource + 'static,
{
    let limit = service.policy().max_bytes();
    let upload = match read_upload(multipart, limit).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return intake_error_response(IntakeError::MissingFile),
        Err(err) => return intake_error_response(err),
    };

    match tokio::task::spawn_blocking(move || service.ingest(&upload)).await {
        Ok(Ok(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(Err(err)) => intake_error_response(err),
        Err(join_error) => {
            error!(error = %join_error, "application form extraction task failed");
            let payload = json!({ "error": "application form extraction failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

async fn read_upload(
    mut multipart: Multipart,
    limit: usize,
) -> Result<Option<UploadedForm>, IntakeError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(err, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| multipart_error(err, limit))?;

        return Ok(Some(UploadedForm {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError, limit: usize) -> IntakeError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        IntakeError::PayloadTooLarge { limit }
    } else {
        IntakeError::InvalidUpload(err.body_text())
    }
}

fn intake_error_response(err: IntakeError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (err.status_code(), Json(payload)).into_response()
}

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use student_intake::config::IntakeConfig;
use student_intake::intake::{
    intake_router, ApplicationIntakeService, IntakeError, PdfTextSource, UNABLE_TO_PARSE,
};
use tower::ServiceExt;

const BOUNDARY: &str = "intake-test-boundary";
const ENDPOINT: &str = "/api/v1/students/parse-application";

/// Decoder stand-in that returns canned text, or fails like a corrupt PDF.
struct CannedDecoder(Option<&'static str>);

impl PdfTextSource for CannedDecoder {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, IntakeError> {
        match self.0 {
            Some(text) => Ok(text.to_string()),
            None => Err(IntakeError::Decode("corrupt xref table".to_string())),
        }
    }
}

fn app(decoder: CannedDecoder, config: IntakeConfig) -> Router {
    let service = Arc::new(ApplicationIntakeService::new(Arc::new(decoder), config));
    intake_router(service)
}

fn multipart_request(field: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"application.pdf\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(ENDPOINT)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request builds")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}

#[tokio::test]
async fn parses_uploaded_application_form() {
    let app = app(
        CannedDecoder(Some(
            "First Name: Jane\nLast Name: Doe\nDOB: 05/02/1999\nUniversities: MIT, Tufts\nStony Brook",
        )),
        IntakeConfig::default(),
    );

    let (status, body) = send(
        app,
        multipart_request("file", "application/pdf", b"%PDF-1.4 stub"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "dateOfBirth": "1999-05-02",
            "desiredUniversities": ["MIT", "Tufts"],
            "shorelightApplication": true,
            "shorelightUniversities": ["Stony Brook"],
            "applicationFormCollected": true,
        })
    );
}

#[tokio::test]
async fn missing_file_field_is_a_bad_request() {
    let app = app(CannedDecoder(Some("First Name: Jane")), IntakeConfig::default());

    let (status, body) = send(
        app,
        multipart_request("attachment", "application/pdf", b"%PDF-1.4 stub"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("No PDF file was uploaded. Please select a PDF file to upload.")
    );
}

#[tokio::test]
async fn non_pdf_upload_is_rejected() {
    let app = app(CannedDecoder(Some("First Name: Jane")), IntakeConfig::default());

    let (status, _) = send(app, multipart_request("file", "image/png", b"\x89PNG")).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn undecodable_pdf_reports_manual_entry_message() {
    let app = app(CannedDecoder(None), IntakeConfig::default());

    let (status, body) = send(
        app,
        multipart_request("file", "application/pdf", b"%PDF-1.4 broken"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!(UNABLE_TO_PARSE));
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let config = IntakeConfig {
        max_upload_bytes: 8,
        ..IntakeConfig::default()
    };
    let app = app(CannedDecoder(Some("First Name: Jane")), config);

    let (status, _) = send(
        app,
        multipart_request("file", "application/pdf", b"%PDF-1.4 with more than eight bytes"),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{invoice_sheet, to_xlsx, Line};
use invoice_ingest::{api, IngestService};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "invoice-upload-boundary";
const XLSX_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn app() -> Router {
    api::router(Arc::new(IngestService::default()), 10 * 1024 * 1024)
}

fn multipart_body(month: Option<&str>, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(month) = month {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"invoicingMonth\"\r\n\r\n");
        body.extend_from_slice(month.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((content_type, bytes)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"file\"; filename=\"invoices.xlsx\"\r\n",
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn sample_xlsx() -> Vec<u8> {
    to_xlsx(&invoice_sheet(
        "Jan 2024",
        &[Line::ready(2.0, 50.0, 100.0, "USD", "EUR")],
    ))
}

#[tokio::test]
async fn test_upload_returns_annotated_rows() {
    let xlsx = sample_xlsx();
    let (status, body) = send(post(
        "/api/upload",
        multipart_body(Some("2024-01"), Some((XLSX_TYPE, xlsx.as_slice()))),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "File uploaded and processed successfully");
    assert_eq!(json["filename"], "invoices.xlsx");
    assert_eq!(json["invoicingMonth"], "2024-01");
    assert_eq!(json["invoicesData"][0]["InvoiceTotal"], 111.11);
}

#[tokio::test]
async fn test_upload_without_file() {
    let (status, body) = send(post("/api/upload", multipart_body(Some("2024-01"), None))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_rejects_non_spreadsheet_content_type() {
    let (status, body) = send(post(
        "/api/upload",
        multipart_body(Some("2024-01"), Some(("application/pdf", &b"%PDF-1.7"[..]))),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Invalid file type. Only XLS files are allowed.");
}

#[tokio::test]
async fn test_upload_without_invoicing_month() {
    let xlsx = sample_xlsx();
    let (status, body) = send(post("/api/upload", multipart_body(None, Some((XLSX_TYPE, xlsx.as_slice()))))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json["error"],
        "Invalid or missing invoicingMonth. Format should be YYYY-MM."
    );
}

#[tokio::test]
async fn test_upload_with_mismatched_month() {
    let xlsx = sample_xlsx();
    let (status, _) = send(post(
        "/api/upload",
        multipart_body(Some("2024-02"), Some((XLSX_TYPE, xlsx.as_slice()))),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_csv_export_endpoint() {
    let xlsx = sample_xlsx();
    let (status, body) = send(post(
        "/api/upload/csv",
        multipart_body(Some("2024-01"), Some((XLSX_TYPE, xlsx.as_slice()))),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Customer,Cust No',Project Type,Quantity,Price Per Item,Item Price Currency,Total Price,Invoice Currency,Status,Invoice #,InvoiceTotal,ValidationErrors")
    );
    assert_eq!(
        lines.next(),
        Some("Acme Ltd,C-100,Consulting,2,50,USD,100,EUR,Ready,,111.11,")
    );
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

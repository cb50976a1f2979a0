use crate::error::IngestError;
use crate::models::IngestResult;
use crate::service::{export_to_csv, IngestService, Upload};
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// 允许上传的文件类型
const ALLOWED_CONTENT_TYPES: [&str; 3] = [
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/csv",
];

/// 响应体
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(flatten)]
    pub result: IngestResult,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Invalid file type. Only XLS files are allowed.")]
    InvalidFileType,

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Ingest(e) if !e.is_client_error() => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        tracing::warn!("Upload rejected ({}): {:?}", status, self);
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 上传并校验发票明细表, 返回 JSON
pub async fn upload(
    State(service): State<Arc<IngestService>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let result = run_pipeline(service, upload).await?;

    Ok(Json(UploadResponse {
        message: "File uploaded and processed successfully".to_string(),
        result,
    }))
}

/// 上传并校验发票明细表, 以 CSV 返回校验后的行
pub async fn upload_csv(
    State(service): State<Arc<IngestService>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let result = run_pipeline(service, upload).await?;

    let mut body = Vec::new();
    export_to_csv(&result.invoices_data, &mut body)
        .map_err(|e| IngestError::Processing(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response())
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut invoicing_month = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
                    return Err(ApiError::InvalidFileType);
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                file = Some((filename, bytes.to_vec()));
            }
            "invoicingMonth" => {
                invoicing_month = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
            }
            _ => {}
        }
    }

    let Some((filename, bytes)) = file else {
        return Err(ApiError::NoFile);
    };

    tracing::info!(
        "Received upload {} ({} bytes), invoicingMonth {}",
        filename,
        bytes.len(),
        invoicing_month
    );

    Ok(Upload {
        filename,
        bytes,
        invoicing_month,
    })
}

/// 解析是纯 CPU 计算, 放到阻塞线程池; 处理过程中的 panic 转为通用处理错误
async fn run_pipeline(service: Arc<IngestService>, upload: Upload) -> Result<IngestResult, IngestError> {
    tokio::task::spawn_blocking(move || service.process(&upload))
        .await
        .map_err(|e| IngestError::Processing(e.to_string()))?
}

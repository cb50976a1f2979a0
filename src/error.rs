use thiserror::Error;

/// 结构性错误: 任何一个都会使整个上传请求失败, 不返回部分结果
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unable to read the uploaded file as a spreadsheet: {0}")]
    Decode(String),

    #[error("Invalid file structure.")]
    EmptySheet,

    #[error("Invalid or missing invoicingMonth. Format should be YYYY-MM.")]
    InvalidRequestedPeriod(String),

    #[error("Unable to parse the invoicing month '{0}' found in the file.")]
    PeriodFormat(String),

    #[error("Invoicing date in the file does not match the invoicing date provided.")]
    PeriodMismatch { file: String, requested: String },

    #[error("Invalid file structure. No header row found.")]
    MissingHeader,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid file structure. Missing currency rates for {}.", .0.join(", "))]
    MissingCurrencyRates(Vec<String>),

    #[error("Error processing the file")]
    Processing(String),
}

impl IngestError {
    /// 是否为调用方输入导致的错误 (HTTP 层映射为 400)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, IngestError::Processing(_))
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

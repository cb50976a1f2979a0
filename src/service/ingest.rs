use crate::error::{IngestError, Result};
use crate::models::schema::DEFAULT_BASE_CURRENCY;
use crate::models::{DataRow, HeaderRow, IngestResult, Period};
use crate::service::rates::build_rate_table;
use crate::service::validator::reconcile_rows;
use crate::sheet::{locate_data_bounds, locate_header_row, locate_period, locate_rate_block, read_grid};
use serde::{Deserialize, Serialize};

/// 导入策略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOptions {
    /// 汇率区缺失时默认汇率为 1 的基准币种
    pub base_currency: String,
    /// 为 true 时, 数据区存在未知币种直接拒绝整个文件
    pub reject_missing_currencies: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            reject_missing_currencies: false,
        }
    }
}

/// 一次上传
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub invoicing_month: String,
}

/// 发票明细导入服务: 解码 -> 定位区域 -> 汇率表 -> 逐行校验 -> 组装结果
///
/// 无共享可变状态, 同一个实例可以被并发调用。
#[derive(Debug, Clone, Default)]
pub struct IngestService {
    options: IngestOptions,
}

impl IngestService {
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    pub fn process(&self, upload: &Upload) -> Result<IngestResult> {
        let requested = Period::parse_requested(&upload.invoicing_month)?;

        // 1. 解码
        let grid = read_grid(&upload.bytes)?;

        // 2. 开票月份必须与请求一致
        let file_period = locate_period(&grid)?;
        tracing::debug!("File invoicing month: {}", file_period);
        if file_period != requested {
            return Err(IngestError::PeriodMismatch {
                file: file_period.to_string(),
                requested: requested.to_string(),
            });
        }

        // 3. 表头
        let header_idx = locate_header_row(&grid)?;
        let header_cells = grid.row(header_idx).unwrap_or_default();
        let header = HeaderRow::from_cells(header_cells);
        tracing::debug!("Header row at index {} with {} columns", header_idx, header.len());

        let missing_columns = header.missing_required();
        if !missing_columns.is_empty() {
            return Err(IngestError::MissingColumns(missing_columns));
        }

        // 4. 汇率表
        let rows = grid.rows();
        let data_bounds = locate_data_bounds(&grid, header_idx);
        let preamble = rows.get(locate_rate_block(header_idx)).unwrap_or_default();
        let data_block = &rows[data_bounds.clone()];

        let build = build_rate_table(preamble, &header, data_block, &self.options.base_currency);
        tracing::debug!("Currency rates: {:?}", build.table);
        if !build.missing.is_empty() {
            tracing::debug!("Missing currencies: {:?}", build.missing);
            if self.options.reject_missing_currencies {
                return Err(IngestError::MissingCurrencyRates(build.missing));
            }
        }

        // 5. 过滤后逐行校验 (行号从 1 开始, 与原表一致)
        let data_rows: Vec<DataRow> = data_block
            .iter()
            .enumerate()
            .map(|(offset, cells)| DataRow::from_cells(&header, cells, data_bounds.start + offset + 1))
            .filter(DataRow::is_admitted)
            .collect();
        let skipped = data_block.len() - data_rows.len();

        let invoices_data = reconcile_rows(data_rows, &build.table);
        let invalid = invoices_data.iter().filter(|r| !r.is_valid()).count();

        tracing::info!(
            "Processed {}: {} rows, {} skipped, {} with validation errors",
            upload.filename,
            invoices_data.len(),
            skipped,
            invalid
        );

        // 6. 组装结果
        Ok(IngestResult {
            filename: upload.filename.clone(),
            invoicing_month: file_period.to_string(),
            currency_rates: build.table,
            missing_currency: build.missing,
            invoices_data,
        })
    }
}

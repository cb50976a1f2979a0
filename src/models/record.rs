use crate::models::cell::Cell;
use crate::models::header::HeaderRow;
use crate::models::rates::RateTable;
use crate::models::schema::{INVOICE_NUMBER, READY_STATUS, STATUS};
use indexmap::IndexMap;
use serde::Serialize;

static EMPTY_CELL: Cell = Cell::Empty;

/// 数据区的一行, 按表头列名取值
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    /// 在原表中的行号 (从 1 开始), 只用于错误信息
    pub ordinal: usize,
    pub fields: IndexMap<String, Cell>,
}

impl DataRow {
    pub fn from_cells(header: &HeaderRow, cells: &[Cell], ordinal: usize) -> Self {
        let fields = header
            .columns()
            .map(|(name, idx)| (name.to_string(), cells.get(idx).cloned().unwrap_or_default()))
            .collect();
        Self { ordinal, fields }
    }

    /// 不存在的列视为空单元格
    pub fn get(&self, column: &str) -> &Cell {
        self.fields.get(column).unwrap_or(&EMPTY_CELL)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.get(STATUS), Cell::Text(s) if s == READY_STATUS)
    }

    pub fn has_invoice_number(&self) -> bool {
        !self.get(INVOICE_NUMBER).is_blank()
    }

    /// 只有 Ready 或已填发票号的行进入校验与输出
    pub fn is_admitted(&self) -> bool {
        self.is_ready() || self.has_invoice_number()
    }
}

/// 校验后的输出行: 原始列 + 开票金额 + 校验错误
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRecord {
    #[serde(flatten)]
    pub fields: IndexMap<String, Cell>,
    #[serde(rename = "InvoiceTotal")]
    pub invoice_total: Option<f64>,
    #[serde(rename = "ValidationErrors")]
    pub validation_errors: Vec<String>,
}

impl InvoiceRecord {
    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }
}

/// 上传处理结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResult {
    pub filename: String,
    pub invoicing_month: String,
    pub currency_rates: RateTable,
    pub missing_currency: Vec<String>,
    pub invoices_data: Vec<InvoiceRecord>,
}

use crate::models::cell::format_number;
use crate::models::schema::{
    INVOICE_CURRENCY, ITEM_PRICE_CURRENCY, PRICE_PER_ITEM, QUANTITY, READY_STATUS, REQUIRED_COLUMNS,
    TOTAL_PRICE,
};
use crate::models::{DataRow, InvoiceRecord, RateTable};

/// 逐行校验并换算开票金额
///
/// 行级错误不会中断批处理, 每一行都带着自己的错误列表输出。
pub fn reconcile_rows(rows: Vec<DataRow>, rates: &RateTable) -> Vec<InvoiceRecord> {
    rows.into_iter().map(|row| reconcile_row(row, rates)).collect()
}

pub fn reconcile_row(row: DataRow, rates: &RateTable) -> InvoiceRecord {
    let ordinal = row.ordinal;
    let mut errors = Vec::new();

    // 1. 必填列
    for field in REQUIRED_COLUMNS {
        if row.get(field).is_blank() {
            errors.push(format!("{} is required in row {}", field, ordinal));
        }
    }

    // 2. 非 Ready 状态必须有发票号
    if !row.has_invoice_number() && !row.is_ready() {
        errors.push(format!(
            "Invoice # must be filled if status is not \"{}\" - row {}",
            READY_STATUS, ordinal
        ));
    }

    // 3. 币种换算
    let total_price = row.get(TOTAL_PRICE).as_number();
    let item_currency = row.get(ITEM_PRICE_CURRENCY).as_text();
    let invoice_currency = row.get(INVOICE_CURRENCY).as_text();

    let mut invoice_total = Some(0.0);
    match rates.conversion_rate(&item_currency, &invoice_currency) {
        Some(rate) => {
            invoice_total = if item_currency == invoice_currency {
                total_price
            } else {
                total_price.map(|total| total * rate)
            };
        }
        None => {
            errors.push(format!(
                "Unsupported currency conversion from {} to {} on {}. Check the provided currency list",
                item_currency, invoice_currency, ordinal
            ));
        }
    }

    // 4. 单价 x 数量 必须等于总价, 否则换算结果作废
    let calculated = row
        .get(PRICE_PER_ITEM)
        .as_number()
        .zip(row.get(QUANTITY).as_number())
        .map(|(price, quantity)| price * quantity);
    let matches = matches!((total_price, calculated), (Some(stated), Some(calc)) if stated == calc);
    if !matches {
        errors.push(format!(
            "The provided total price {} does not match the calculated total price {} on row {}.",
            display_amount(total_price),
            display_amount(calculated),
            ordinal
        ));
        invoice_total = None;
    }

    InvoiceRecord {
        fields: row.fields,
        invoice_total: invoice_total.map(round_cents),
        validation_errors: errors,
    }
}

/// 保留两位小数; 恰好为 0 时原样返回
fn round_cents(value: f64) -> f64 {
    if value == 0.0 {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// 缺失或为 0 的金额在错误信息中显示为空
fn display_amount(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_number(v),
        _ => String::new(),
    }
}

use crate::models::cell::format_number;
use crate::models::InvoiceRecord;
use indexmap::IndexSet;
use std::io::Write;

/// 将 Option<f64> 转换为 CSV 字符串
fn option_to_csv(val: Option<f64>) -> String {
    val.map(format_number).unwrap_or_default()
}

/// 导出校验结果到 CSV (原始列按首次出现顺序, 末尾追加开票金额与校验错误)
pub fn export_to_csv<W: Write>(records: &[InvoiceRecord], output: W) -> Result<(), csv::Error> {
    let mut columns: IndexSet<&str> = IndexSet::new();
    for record in records {
        columns.extend(record.fields.keys().map(String::as_str));
    }

    let mut writer = csv::Writer::from_writer(output);

    let mut header: Vec<&str> = columns.iter().copied().collect();
    header.push("InvoiceTotal");
    header.push("ValidationErrors");
    writer.write_record(&header)?;

    for record in records {
        let mut line: Vec<String> = columns
            .iter()
            .map(|col| {
                record
                    .fields
                    .get(*col)
                    .map(|cell| cell.as_text().into_owned())
                    .unwrap_or_default()
            })
            .collect();
        line.push(option_to_csv(record.invoice_total));
        line.push(record.validation_errors.join("; "));
        writer.write_record(&line)?;
    }

    writer.flush()?;
    Ok(())
}

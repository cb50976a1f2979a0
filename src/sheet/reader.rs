use crate::error::{IngestError, Result};
use crate::models::{Cell, Grid};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// zip 容器 (xlsx / xlsm / xlsb / ods)
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE 复合文档 (旧版 xls)
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// 将上传的字节流解码为网格 (只读取第一个工作表)
pub fn read_grid(bytes: &[u8]) -> Result<Grid> {
    let grid = if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(CFB_MAGIC) {
        read_workbook(bytes)?
    } else if let Some(text) = as_plain_text(bytes) {
        read_csv(text)?
    } else {
        return Err(IngestError::Decode("unrecognized file format".to_string()));
    };

    // 至少需要月份行和另一行
    if grid.len() < 2 {
        return Err(IngestError::EmptySheet);
    }

    tracing::debug!("Decoded sheet with {} rows", grid.len());
    Ok(grid)
}

fn read_workbook(bytes: &[u8]) -> Result<Grid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| IngestError::Decode(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| IngestError::Decode(e.to_string()))?,
        None => return Err(IngestError::EmptySheet),
    };

    // calamine 的区域从第一个非空单元格开始, 这里补齐到 A1
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for data_row in range.rows() {
        let mut row = vec![Cell::Empty; start_col];
        row.extend(data_row.iter().map(to_cell));
        rows.push(row);
    }

    Ok(Grid::from_rows(rows))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
    }
}

/// UTF-8 且不含 NUL 的内容按 CSV 处理
fn as_plain_text(bytes: &[u8]) -> Option<&str> {
    if bytes.is_empty() || bytes.contains(&0) {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;
    Some(text.strip_prefix('\u{feff}').unwrap_or(text))
}

fn read_csv(text: &str) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    // csv 会跳过空行, 这里按行号补回空行, 保证空行仍是数据区结束标记且行号与原文件一致
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut next_line: u64 = 1;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Decode(e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or(next_line);
        for _ in next_line..line {
            rows.push(Vec::new());
        }
        // 引号内的换行也占行号
        let embedded_newlines: usize = record.iter().map(|f| f.matches('\n').count()).sum();
        next_line = line + 1 + embedded_newlines as u64;
        rows.push(record.iter().map(csv_field_to_cell).collect());
    }

    Ok(Grid::from_rows(rows))
}

fn csv_field_to_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::Text(field.to_string()),
    }
}

//! 按形状 (而非固定行号) 定位表格中的各个区域:
//! 第 0 行是开票月份, 第 1 行到表头之间是汇率区, 表头之后到第一个空行是数据区。

use crate::error::{IngestError, Result};
use crate::models::{Cell, Grid, Period};
use std::ops::Range;

/// 表头行至少需要的非空单元格数 (严格大于)
const HEADER_MIN_CELLS: usize = 2;

/// 读取 (0, 0) 单元格中的开票月份
pub fn locate_period(grid: &Grid) -> Result<Period> {
    match grid.cell(0, 0) {
        Some(Cell::Text(label)) => Period::parse_sheet_label(label),
        Some(other) => Err(IngestError::PeriodFormat(other.as_text().into_owned())),
        None => Err(IngestError::PeriodFormat(String::new())),
    }
}

/// 第一个非空单元格数大于 2 的行
pub fn locate_header_row(grid: &Grid) -> Result<usize> {
    grid.rows()
        .iter()
        .position(|row| row.iter().filter(|c| !c.is_blank()).count() > HEADER_MIN_CELLS)
        .ok_or(IngestError::MissingHeader)
}

/// 数据区: 表头下一行起, 到表头之后第一个空行 (不含) 为止; 没有空行则到表尾
pub fn locate_data_bounds(grid: &Grid, header_idx: usize) -> Range<usize> {
    let start = (header_idx + 1).min(grid.len());
    let end = grid.rows()[start..]
        .iter()
        .position(|row| row.is_empty())
        .map(|offset| start + offset)
        .unwrap_or(grid.len());
    start..end
}

/// 汇率区: 第 1 行到表头之间 (不含两端)
pub fn locate_rate_block(header_idx: usize) -> Range<usize> {
    1..header_idx.max(1)
}

use crate::models::cell::Cell;
use crate::models::schema::{CURRENCY_COLUMN_MARKER, REQUIRED_COLUMNS};
use indexmap::IndexMap;

/// 表头行: 列名 -> 列序号 (保持表格中的列顺序)
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRow {
    columns: IndexMap<String, usize>,
}

impl HeaderRow {
    /// 空白表头单元格被忽略; 列名重复时以最后一列为准
    pub fn from_cells(cells: &[Cell]) -> Self {
        let mut columns = IndexMap::new();
        for (idx, cell) in cells.iter().enumerate() {
            if cell.is_blank() {
                continue;
            }
            columns.insert(cell.as_text().into_owned(), idx);
        }
        Self { columns }
    }

    /// 缺失的必填列, 按固定列表顺序返回
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|name| !self.columns.contains_key(**name))
            .map(|name| name.to_string())
            .collect()
    }

    /// 列名包含 "currency" 的列序号
    pub fn currency_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(CURRENCY_COLUMN_MARKER))
            .map(|(_, idx)| *idx)
            .collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, usize)> {
        self.columns.iter().map(|(name, idx)| (name.as_str(), *idx))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

use crate::models::{Cell, HeaderRow, RateTable};
use indexmap::{IndexMap, IndexSet};

/// 汇率表构建结果
#[derive(Debug, Clone, PartialEq)]
pub struct RateTableBuild {
    pub table: RateTable,
    /// 数据区用到但汇率区没有的币种 (去重、保序)
    pub missing: Vec<String>,
}

/// 从汇率区构建汇率表, 并检查数据区中的币种
///
/// 每行第一个单元格的第一个词是币种代码, 第二个单元格是汇率; 同一币种出现多次时后者覆盖前者。
/// 基准币种若只出现在数据区, 则以汇率 1 补入汇率表, 不计入缺失列表。
pub fn build_rate_table(
    preamble: &[Vec<Cell>],
    header: &HeaderRow,
    data_rows: &[Vec<Cell>],
    base_currency: &str,
) -> RateTableBuild {
    let mut rates = parse_preamble(preamble);
    let mut missing = collect_missing(&rates, header, data_rows);

    if missing.shift_remove(base_currency) {
        tracing::debug!("Base currency {} has no rate, defaulting to 1", base_currency);
        rates.insert(base_currency.to_string(), 1.0);
    }

    RateTableBuild {
        table: RateTable::new(rates),
        missing: missing.into_iter().collect(),
    }
}

fn parse_preamble(rows: &[Vec<Cell>]) -> IndexMap<String, f64> {
    let mut rates = IndexMap::new();

    for row in rows {
        let label = row.first().map(|c| c.as_text()).unwrap_or_default();
        let Some(code) = label.split_whitespace().next() else {
            continue;
        };

        match row.get(1).and_then(Cell::as_number) {
            Some(rate) if rate > 0.0 => {
                rates.insert(code.to_string(), rate);
            }
            _ => {
                tracing::warn!("Skipping currency {} without a positive rate", code);
            }
        }
    }

    rates
}

fn collect_missing(
    rates: &IndexMap<String, f64>,
    header: &HeaderRow,
    data_rows: &[Vec<Cell>],
) -> IndexSet<String> {
    let currency_columns = header.currency_columns();
    let mut missing = IndexSet::new();

    for row in data_rows {
        for &idx in &currency_columns {
            let Some(cell) = row.get(idx) else {
                continue;
            };
            if cell.is_blank() {
                continue;
            }
            let code = cell.as_text();
            if !rates.contains_key(&*code) {
                missing.insert(code.into_owned());
            }
        }
    }

    missing
}

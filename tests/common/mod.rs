#![allow(dead_code)]

use invoice_ingest::models::Cell;
use rust_xlsxwriter::Workbook;

pub const HEADER: [&str; 10] = [
    "Customer",
    "Cust No'",
    "Project Type",
    "Quantity",
    "Price Per Item",
    "Item Price Currency",
    "Total Price",
    "Invoice Currency",
    "Status",
    "Invoice #",
];

/// 一行数据, 列顺序与 HEADER 一致
pub struct Line<'a> {
    pub quantity: f64,
    pub price: f64,
    pub total: f64,
    pub item_ccy: &'a str,
    pub invoice_ccy: &'a str,
    pub status: &'a str,
    pub invoice_no: &'a str,
}

impl<'a> Line<'a> {
    pub fn ready(quantity: f64, price: f64, total: f64, item_ccy: &'a str, invoice_ccy: &'a str) -> Self {
        Self {
            quantity,
            price,
            total,
            item_ccy,
            invoice_ccy,
            status: "Ready",
            invoice_no: "",
        }
    }

    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from("Acme Ltd"),
            Cell::from("C-100"),
            Cell::from("Consulting"),
            Cell::Number(self.quantity),
            Cell::Number(self.price),
            Cell::from(self.item_ccy),
            Cell::Number(self.total),
            Cell::from(self.invoice_ccy),
            Cell::from(self.status),
            Cell::from(self.invoice_no),
        ]
    }
}

pub fn text_row(values: &[&str]) -> Vec<Cell> {
    values.iter().map(|v| Cell::from(*v)).collect()
}

/// 月份行 + USD/EUR 汇率区 + 表头 + 数据行
pub fn invoice_sheet(period: &str, lines: &[Line<'_>]) -> Vec<Vec<Cell>> {
    let mut rows = vec![
        text_row(&[period]),
        vec![Cell::from("USD rate"), Cell::Number(1.0)],
        vec![Cell::from("EUR rate"), Cell::Number(0.9)],
        text_row(&HEADER),
    ];
    rows.extend(lines.iter().map(Line::cells));
    rows
}

/// 写出一个真实的 xlsx 文件 (内存中)
pub fn to_xlsx(rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(r as u32, c as u16, s).unwrap();
                }
                Cell::Number(n) => {
                    worksheet.write_number(r as u32, c as u16, *n).unwrap();
                }
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

pub fn to_csv(rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        let fields: Vec<String> = row.iter().map(|c| c.as_text().into_owned()).collect();
        writer.write_record(&fields).unwrap();
    }
    writer.into_inner().unwrap()
}

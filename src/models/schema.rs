//! 上传表格的固定结构约定

/// 表头必须包含的列 (列顺序不限)
pub const REQUIRED_COLUMNS: [&str; 9] = [
    CUSTOMER,
    CUSTOMER_NUMBER,
    PROJECT_TYPE,
    QUANTITY,
    PRICE_PER_ITEM,
    ITEM_PRICE_CURRENCY,
    TOTAL_PRICE,
    INVOICE_CURRENCY,
    STATUS,
];

pub const CUSTOMER: &str = "Customer";
pub const CUSTOMER_NUMBER: &str = "Cust No'";
pub const PROJECT_TYPE: &str = "Project Type";
pub const QUANTITY: &str = "Quantity";
pub const PRICE_PER_ITEM: &str = "Price Per Item";
pub const ITEM_PRICE_CURRENCY: &str = "Item Price Currency";
pub const TOTAL_PRICE: &str = "Total Price";
pub const INVOICE_CURRENCY: &str = "Invoice Currency";
pub const STATUS: &str = "Status";

/// 可选列, 状态非 Ready 时必须填写
pub const INVOICE_NUMBER: &str = "Invoice #";

pub const READY_STATUS: &str = "Ready";

/// 列名包含该词 (不区分大小写) 即视为币种列
pub const CURRENCY_COLUMN_MARKER: &str = "currency";

/// 表格首格中的月份写法, 如 "Jan 2024"
pub const SHEET_PERIOD_FORMAT: &str = "%b %Y";

/// 调用方传入的月份写法, 如 "2024-01"
pub const REQUEST_PERIOD_FORMAT: &str = "%Y-%m";

pub const DEFAULT_BASE_CURRENCY: &str = "ILS";

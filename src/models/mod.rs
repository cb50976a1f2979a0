pub mod cell;
pub mod header;
pub mod period;
pub mod rates;
pub mod record;
pub mod schema;

pub use cell::{Cell, Grid};
pub use header::HeaderRow;
pub use period::Period;
pub use rates::RateTable;
pub use record::{DataRow, IngestResult, InvoiceRecord};

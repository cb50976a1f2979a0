pub mod export;
pub mod ingest;
pub mod rates;
pub mod validator;

pub use export::export_to_csv;
pub use ingest::{IngestOptions, IngestService, Upload};
pub use rates::{build_rate_table, RateTableBuild};
pub use validator::{reconcile_row, reconcile_rows};

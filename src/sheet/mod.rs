pub mod locator;
pub mod reader;

pub use locator::{locate_data_bounds, locate_header_row, locate_period, locate_rate_block};
pub use reader::read_grid;

//! Reading labeled tables and writing result spreadsheets (CSV).
pub mod table;

pub use table::{read_table, read_table_with_config, TableReaderConfig};
pub use table::{write_importance_csv, write_metrics_csv};

pub mod error;
pub mod flatten;
pub mod layout;
pub mod matrix;
pub mod table;
pub mod template;

pub use error::{IngestError, Result};
pub use flatten::flatten_table;
pub use layout::{LINE_TOLERANCE, TextFragment, fragments_from_json, reconstruct_text};
pub use matrix::{
    ColumnMap, MATRIX_START_INFO, MatrixColumn, MatrixImport, excel_serial_to_date,
    parse_date_cell, parse_matrix, split_cast, split_sequences,
};
pub use table::{CellTable, MatrixCell, read_cell_table, read_cell_table_path};
pub use template::write_template;

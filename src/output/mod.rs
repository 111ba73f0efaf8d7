//! Output module for exporting collected reviews
//!
//! This module handles:
//! - Serializing review rows into an xlsx workbook
//! - Normalizing the output filename

mod filename;
mod xlsx;

pub use filename::{output_file_name, DEFAULT_FILE_NAME, XLSX_MIME_TYPE};
pub use xlsx::{export_xlsx, write_xlsx, MAX_CELL_CHARS};

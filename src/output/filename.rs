/// Filename used when none is given
pub const DEFAULT_FILE_NAME: &str = "reviews.xlsx";

/// MIME type of the exported workbook
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const XLSX_SUFFIX: &str = ".xlsx";

/// Normalizes the requested output filename
///
/// Blank input falls back to `reviews.xlsx`; a name without an `.xlsx`
/// suffix (compared case-insensitively) gets one appended.
///
/// # Examples
///
/// ```
/// use review_harvest::output::output_file_name;
///
/// assert_eq!(output_file_name("  "), "reviews.xlsx");
/// assert_eq!(output_file_name("drills"), "drills.xlsx");
/// assert_eq!(output_file_name("Drills.XLSX"), "Drills.XLSX");
/// ```
pub fn output_file_name(requested: &str) -> String {
    let name = requested.trim();
    if name.is_empty() {
        return DEFAULT_FILE_NAME.to_string();
    }

    if name.to_lowercase().ends_with(XLSX_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, XLSX_SUFFIX)
    }
}

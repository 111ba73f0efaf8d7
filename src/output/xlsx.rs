//! Single-sheet xlsx export
//!
//! Builds a minimal SpreadsheetML package in memory: one worksheet holding
//! a header row plus one row per review, with text stored in the shared
//! strings table.

use crate::extract::{CellValue, ReviewRow, COLUMNS};
use crate::{ReviewError, Result};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Longest text a single cell may hold
pub const MAX_CELL_CHARS: usize = 32_767;

const SHEET_NAME: &str = "Sheet1";

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;

const STYLES: &str = r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

/// Shared strings table, deduplicated in first-use order
#[derive(Default)]
struct SharedStrings {
    index: HashMap<String, usize>,
    strings: Vec<String>,
    references: usize,
}

impl SharedStrings {
    fn intern(&mut self, text: &str) -> usize {
        self.references += 1;
        if let Some(&id) = self.index.get(text) {
            return id;
        }
        let id = self.strings.len();
        self.index.insert(text.to_string(), id);
        self.strings.push(text.to_string());
        id
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(
            r#"{}<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            XML_DECL,
            MAIN_NS,
            self.references,
            self.strings.len()
        );
        for text in &self.strings {
            xml.push_str(r#"<si><t xml:space="preserve">"#);
            push_escaped(&mut xml, text);
            xml.push_str("</t></si>");
        }
        xml.push_str("</sst>");
        xml
    }
}

/// Serializes rows into an xlsx workbook
///
/// The sheet starts with the `COLUMNS` header row. Text becomes shared
/// strings, numbers and booleans keep their cell types, and empty fields
/// produce no cell at all.
///
/// # Errors
///
/// * `ReviewError::Serialization` - a text value exceeds the per-cell limit,
///   or the package could not be assembled
pub fn export_xlsx(rows: &[ReviewRow]) -> Result<Vec<u8>> {
    let mut strings = SharedStrings::default();
    let sheet = build_sheet(rows, &mut strings)?;
    let workbook = format!(
        r#"{}<workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        XML_DECL, MAIN_NS, REL_NS, SHEET_NAME
    );

    let parts = [
        ("[Content_Types].xml", format!("{}{}", XML_DECL, CONTENT_TYPES)),
        ("_rels/.rels", format!("{}{}", XML_DECL, PACKAGE_RELS)),
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", format!("{}{}", XML_DECL, WORKBOOK_RELS)),
        ("xl/styles.xml", format!("{}{}", XML_DECL, STYLES)),
        ("xl/sharedStrings.xml", strings.to_xml()),
        ("xl/worksheets/sheet1.xml", sheet),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())
            .map_err(|e| ReviewError::Serialization(format!("writing {}: {}", name, e)))?;
    }

    let buffer = zip.finish()?.into_inner();
    tracing::debug!("Exported {} row(s) into {} bytes", rows.len(), buffer.len());
    Ok(buffer)
}

/// Exports rows and writes the workbook to `path`
pub fn write_xlsx(rows: &[ReviewRow], path: &Path) -> Result<()> {
    let buffer = export_xlsx(rows)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

fn build_sheet(rows: &[ReviewRow], strings: &mut SharedStrings) -> Result<String> {
    let last_row = rows.len() + 1;
    let mut xml = format!(
        r#"{}<worksheet xmlns="{}"><dimension ref="A1:{}{}"/><sheetData>"#,
        XML_DECL,
        MAIN_NS,
        column_name(COLUMNS.len() - 1),
        last_row
    );

    let header: Vec<CellValue> = COLUMNS
        .iter()
        .map(|name| CellValue::Text((*name).to_string()))
        .collect();
    push_row(&mut xml, 1, header.iter().map(Some), strings)?;

    for (offset, row) in rows.iter().enumerate() {
        push_row(&mut xml, offset + 2, row.cells().into_iter(), strings)?;
    }

    xml.push_str("</sheetData></worksheet>");
    Ok(xml)
}

fn push_row<'a>(
    xml: &mut String,
    row_number: usize,
    cells: impl Iterator<Item = Option<&'a CellValue>>,
    strings: &mut SharedStrings,
) -> Result<()> {
    xml.push_str(&format!(r#"<row r="{}">"#, row_number));

    for (column, cell) in cells.enumerate() {
        let Some(cell) = cell else {
            continue;
        };
        let reference = format!("{}{}", column_name(column), row_number);

        let element = match cell {
            CellValue::Text(text) => {
                if text.chars().count() > MAX_CELL_CHARS {
                    return Err(ReviewError::Serialization(format!(
                        "cell {} exceeds {} characters",
                        reference, MAX_CELL_CHARS
                    )));
                }
                let id = strings.intern(text);
                format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, id)
            }
            CellValue::Integer(n) => format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n),
            CellValue::Number(n) => format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n),
            CellValue::Bool(b) => format!(
                r#"<c r="{}" t="b"><v>{}</v></c>"#,
                reference,
                u8::from(*b)
            ),
        };
        xml.push_str(&element);
    }

    xml.push_str("</row>");
    Ok(())
}

/// Spreadsheet column letters for a zero-based index (0 → A, 26 → AA)
fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Appends XML-escaped text, dropping characters XML 1.0 cannot carry
fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            // Readers fold a literal CR into LF
            '\r' => out.push_str("&#13;"),
            '\t' | '\n' => out.push(c),
            c if c < ' ' || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
}

//! Workbook export tests, verified by reading the output back

use calamine::{open_workbook_from_rs, DataType, Reader, Xlsx};
use review_harvest::extract::{normalize_review, CellValue, ReviewRow, COLUMNS};
use review_harvest::output::{export_xlsx, write_xlsx};
use serde_json::json;
use std::io::Cursor;

fn read_sheet(buffer: Vec<u8>) -> Vec<Vec<DataType>> {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(buffer)).expect("Failed to open workbook");

    assert_eq!(workbook.sheet_names().to_vec(), vec!["Sheet1".to_string()]);

    let range = workbook
        .worksheet_range("Sheet1")
        .expect("Missing sheet")
        .expect("Failed to read sheet");

    range.rows().map(|row| row.to_vec()).collect()
}

fn expected_cell(cell: Option<&CellValue>) -> DataType {
    match cell {
        None => DataType::Empty,
        Some(CellValue::Text(s)) => DataType::String(s.clone()),
        Some(CellValue::Integer(n)) => DataType::Float(*n as f64),
        Some(CellValue::Number(n)) => DataType::Float(*n),
        Some(CellValue::Bool(b)) => DataType::Bool(*b),
    }
}

fn sample_rows() -> Vec<ReviewRow> {
    vec![
        normalize_review(&json!({
            "BadgesOrder": ["top1000Contributor"],
            "ContextDataValues": {"Age": {"Value": "45to54"}},
            "IsRecommended": true,
            "IsSyndicated": false,
            "ProductId": "456",
            "SubmissionTime": "2024-03-02T08:15:00.000+00:00",
            "Rating": 5,
            "Title": "Solid & quiet <really>",
            "ReviewText": "Line one\nLine two",
            "ClientResponses": [{
                "Response": "<div>Thanks!</div>",
                "Date": "2024-03-04",
                "Department": "Customer Care"
            }]
        })),
        normalize_review(&json!({
            "ProductId": "456",
            "Rating": 1,
            "Title": "Solid & quiet <really>",
            "ReviewText": "Line one\r\nLine two\rLine three",
            "IsRecommended": false
        })),
        normalize_review(&json!({
            "BadgesOrder": [],
            "ProductId": "456",
            "Rating": 3.5,
            "ReviewText": "Unicode: ñ ü 漢字 ✓"
        })),
    ]
}

#[test]
fn test_round_trip_preserves_rows() {
    let rows = sample_rows();
    let sheet = read_sheet(export_xlsx(&rows).expect("Export failed"));

    assert_eq!(sheet.len(), rows.len() + 1);

    let header: Vec<DataType> = COLUMNS
        .iter()
        .map(|name| DataType::String((*name).to_string()))
        .collect();
    assert_eq!(sheet[0], header);

    for (row, read_back) in rows.iter().zip(&sheet[1..]) {
        let expected: Vec<DataType> = row.cells().into_iter().map(expected_cell).collect();
        assert_eq!(read_back, &expected);
    }
}

#[test]
fn test_empty_collection_has_header_only() {
    let sheet = read_sheet(export_xlsx(&[]).expect("Export failed"));

    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet[0].len(), COLUMNS.len());
}

#[test]
fn test_write_xlsx_to_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("reviews.xlsx");

    write_xlsx(&sample_rows(), &path).expect("Write failed");

    let buffer = std::fs::read(&path).expect("Failed to read workbook");
    let sheet = read_sheet(buffer);
    assert_eq!(sheet.len(), 4);
    assert_eq!(sheet[2][6], DataType::Float(1.0));
    assert_eq!(sheet[2][0], DataType::Empty);
}

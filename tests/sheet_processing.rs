use chrono::NaiveDate;
use sheetpipe::flatten::{normalize_date_columns, process_sheet};
use sheetpipe::model::{CellValue, Diagnostic, SheetGrid};

fn text_row(values: &[&str]) -> Vec<CellValue> {
    values
        .iter()
        .map(|value| {
            if value.is_empty() {
                CellValue::Empty
            } else {
                CellValue::text(*value)
            }
        })
        .collect()
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn empty_sheet_contributes_no_lines() {
    let output = process_sheet(SheetGrid::empty("Blank"));
    assert!(output.lines.is_empty());
    assert!(output.diagnostics.is_empty());

    let header_only = SheetGrid::new("Header", columns(&["A", "B"]), Vec::new());
    assert!(process_sheet(header_only).lines.is_empty());
}

#[test]
fn customers_sheet_is_flattened_in_row_order() {
    let grid = SheetGrid::new(
        "Customers",
        columns(&["Title", "Name", "DOB", "Gender", "Code", "Balance"]),
        vec![
            text_row(&["mr.", "Ravi  Kumar", "2025-05-31", "Male", "91", "1,250.5"]),
            text_row(&["Ms", "Asha", "1990-01-02", "female", "91", "3.0"]),
        ],
    );

    let output = process_sheet(grid);

    assert_eq!(
        output.lines,
        vec![
            "MR|Ravi Kumar|31-May-2025|MALE|+91|1250.50",
            "MS|Asha|02-Jan-1990|FEMALE|+91|3",
        ]
    );
    assert!(output.diagnostics.is_empty());
}

#[test]
fn identity_sheet_uses_identity_rules() {
    let grid = SheetGrid::new(
        "IDN",
        columns(&["Aadhar_No", "PAN_No", "Gender"]),
        vec![text_row(&["123456789", "abcde1234f", "male"])],
    );

    assert_eq!(process_sheet(grid).lines, vec!["000123456789|ABCDE1234F|MALE"]);
}

#[test]
fn field_count_matches_column_count() {
    let grid = SheetGrid::new(
        "Sparse",
        columns(&["A", "B", "C", "D"]),
        vec![text_row(&["x"]), text_row(&["1", "2", "3", "4", "5"])],
    );

    let output = process_sheet(grid);

    for line in &output.lines {
        assert_eq!(line.split('|').count(), 4, "line {line:?}");
    }
    assert_eq!(output.lines[0], "x|||");
}

#[test]
fn date_column_classification_uses_the_first_row() {
    let grid = SheetGrid::new(
        "Events",
        columns(&["Joined", "Renewed"]),
        vec![
            text_row(&["2025-05-31", "pending"]),
            text_row(&["unknown", "2024-02-29"]),
        ],
    );

    let output = process_sheet(grid);

    assert_eq!(output.lines, vec!["31-May-2025|pending", "unknown|2024-02-29"]);
}

#[test]
fn native_timestamps_in_date_columns_are_reformatted() {
    let timestamp = NaiveDate::from_ymd_opt(2023, 8, 15)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid timestamp");
    let grid = SheetGrid::new(
        "Policies",
        columns(&["Start", "Holder"]),
        vec![vec![CellValue::Timestamp(timestamp), CellValue::text("Asha")]],
    );

    assert_eq!(process_sheet(grid).lines, vec!["15-Aug-2023|Asha"]);
}

#[test]
fn failing_date_column_keeps_original_values() {
    let mut grid = SheetGrid::new(
        "Loans",
        columns(&["Disbursed", "Amount"]),
        vec![
            text_row(&["2025-05-31", "1000"]),
            text_row(&["2025-02-30", "2000"]),
        ],
    );

    let diagnostics = normalize_date_columns(&mut grid);

    assert_eq!(grid.rows[0][0], CellValue::text("2025-05-31"));
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        &diagnostics[0],
        Diagnostic::ColumnUnformatted { sheet, column, .. } if sheet == "Loans" && column == "Disbursed"
    ));

    let output = process_sheet(grid);
    assert_eq!(output.lines, vec!["2025-05-31|1000", "2025-02-30|2000"]);
    assert_eq!(output.diagnostics.len(), 1);
}

#[test]
fn blank_cells_in_date_columns_collapse_to_zero() {
    let grid = SheetGrid::new(
        "Customers",
        columns(&["DOB", "Name"]),
        vec![text_row(&["2025-05-31", "Ravi"]), text_row(&["", ""])],
    );

    let output = process_sheet(grid);

    assert_eq!(output.lines, vec!["31-May-2025|Ravi", "0|"]);
}

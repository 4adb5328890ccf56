use sheetpipe::model::CellValue;
use sheetpipe::normalize::value::{
    CellRule, canonicalize_number, clean, format_cell, format_text, select_rule,
};

#[test]
fn missing_values_become_empty_fields() {
    assert_eq!(format_cell(&CellValue::Empty, "Customers", "Name"), "");
    assert_eq!(format_cell(&CellValue::Empty, "IDN", "Aadhar_No"), "");
}

#[test]
fn cleaning_strips_commas_and_collapses_whitespace() {
    assert_eq!(clean("  1,234,567  "), "1234567");
    assert_eq!(clean("New   Delhi,\tIndia "), "New Delhi India");
    assert_eq!(format_text(" 12,500.50 ", "Accounts", "Balance"), "12500.50");
}

#[test]
fn standard_rules_normalise_known_tokens() {
    assert_eq!(format_text("91", "Customers", "Code"), "+91");
    assert_eq!(format_text("Male", "Customers", "Gender"), "MALE");
    assert_eq!(format_text("fEmAlE", "Customers", "Gender"), "FEMALE");
    assert_eq!(format_text("mr.", "Customers", "Title"), "MR");
    assert_eq!(format_text("Mr", "Customers", "Title"), "MR");
    assert_eq!(format_text("Ms.", "Customers", "Title"), "MS");
    assert_eq!(format_text("ms", "Customers", "Title"), "MS");
}

#[test]
fn country_code_match_is_exact() {
    assert_eq!(format_text("091", "Customers", "Code"), "091");
    assert_eq!(format_text("91.0", "Customers", "Code"), "91");
}

#[test]
fn numeric_canonicalisation_follows_precedence() {
    assert_eq!(canonicalize_number("007"), "007");
    assert_eq!(canonicalize_number("000"), "0");
    assert_eq!(canonicalize_number(""), "0");
    assert_eq!(canonicalize_number("3.0"), "3");
    assert_eq!(canonicalize_number("3.14159"), "3.14");
    assert_eq!(canonicalize_number("0.5"), "0.50");
    assert_eq!(canonicalize_number("-2.5"), "-2.50");
    assert_eq!(canonicalize_number("1e3"), "1000");
    assert_eq!(canonicalize_number("-0.0"), "0");
    assert_eq!(canonicalize_number("42"), "42");
    assert_eq!(canonicalize_number("Mumbai"), "Mumbai");
    assert_eq!(canonicalize_number("31-May-2025"), "31-May-2025");
}

#[test]
fn identity_sheet_pads_aadhar_numbers() {
    assert_eq!(format_text("123456789", "IDN", "Aadhar_No"), "000123456789");
    assert_eq!(format_text("123456789", "idn", "Reference"), "000123456789");
    assert_eq!(format_text("1234567890123", "IDN", "Aadhar_No"), "1234567890123");
}

#[test]
fn aadhar_column_keeps_non_numeric_values_verbatim() {
    assert_eq!(format_text("male", "IDN", "AADHAR"), "male");
    assert_eq!(select_rule("male", "IDN", "aadhar number"), CellRule::AadharNumber);
}

#[test]
fn identity_sheet_uppercases_pan_numbers() {
    assert_eq!(format_text("abcde1234f", "IDN", "PAN_No"), "ABCDE1234F");
    assert_eq!(format_text("abcde1234f", "IDN", "Document"), "ABCDE1234F");
    assert_eq!(format_text("not a pan", "IDN", "pan"), "NOT A PAN");
}

#[test]
fn identity_sheet_falls_back_to_standard_rules() {
    assert_eq!(select_rule("Male", "IDN", "Gender"), CellRule::Gender);
    assert_eq!(format_text("Male", "IDN", "Gender"), "MALE");
    assert_eq!(format_text("3.14159", "IDN", "Score"), "3.14");
}

#[test]
fn identity_rules_do_not_apply_to_other_sheets() {
    assert_eq!(select_rule("123456789", "Customers", "Aadhar_No"), CellRule::Numeric);
    assert_eq!(format_text("123456789", "Customers", "Aadhar_No"), "123456789");
    assert_eq!(format_text("abcde1234f", "Customers", "PAN_No"), "abcde1234f");
}

#[test]
fn canonical_values_are_idempotent() {
    let samples = [
        ("Customers", "Gender", "MALE"),
        ("Customers", "Code", "+91"),
        ("Customers", "Title", "MS"),
        ("Customers", "Amount", "3.14"),
        ("Customers", "Zip", "007"),
        ("IDN", "Aadhar_No", "000123456789"),
        ("IDN", "PAN_No", "ABCDE1234F"),
    ];

    for (sheet, column, value) in samples {
        let once = format_text(value, sheet, column);
        assert_eq!(once, value);
        assert_eq!(format_text(&once, sheet, column), once);
    }
}

#[test]
fn timestamps_outside_date_columns_render_as_text() {
    let timestamp = chrono::NaiveDate::from_ymd_opt(2025, 5, 31)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid timestamp");
    assert_eq!(
        format_cell(&CellValue::Timestamp(timestamp), "Customers", "Updated"),
        "2025-05-31 10:30:00"
    );
}

#[test]
fn signed_integers_lose_their_plus_sign() {
    assert_eq!(canonicalize_number("+12"), "12");
    assert_eq!(canonicalize_number("+0"), "0");
    assert_eq!(canonicalize_number("+1.5"), "1.50");
    assert_eq!(format_text("+919876543210", "Customers", "Phone"), "919876543210");
}

#[test]
fn prefixed_country_code_is_stable() {
    assert_eq!(select_rule("+91", "Customers", "Code"), CellRule::CountryCode);
    assert_eq!(format_text("+91", "Customers", "Code"), "+91");
    let once = format_text("91", "Customers", "Code");
    assert_eq!(format_text(&once, "Customers", "Code"), "+91");
}

#[test]
fn special_floats_render_in_lowercase() {
    assert_eq!(canonicalize_number("inf"), "inf");
    assert_eq!(canonicalize_number("-infinity"), "-inf");
    assert_eq!(canonicalize_number("NaN"), "nan");
}

#[test]
fn digit_group_underscores_are_not_numbers() {
    assert_eq!(canonicalize_number("1_000"), "1_000");
}

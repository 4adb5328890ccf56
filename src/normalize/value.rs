//! Per-cell value normalisation.
//!
//! Each cleaned value is matched against an ordered list of [`CellRule`]s and
//! the first rule that matches produces the output. The identity sheet
//! (`IDN`) prepends two identity-number rules to the standard list; every list
//! ends with [`CellRule::Numeric`], which always matches.

use crate::model::CellValue;

/// Sheet name (compared case-insensitively) holding identity documents.
pub const IDENTITY_SHEET: &str = "IDN";

/// Width Aadhar numbers are zero-padded to.
pub const AADHAR_WIDTH: usize = 12;

/// Length of a PAN.
pub const PAN_LENGTH: usize = 10;

/// A single normalisation rule. Variants are evaluated in the order given by
/// [`rules_for_sheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRule {
    /// Aadhar column, or a purely numeric value of at most 12 digits.
    AadharNumber,
    /// PAN column, or a 10 character alphanumeric value.
    PanNumber,
    /// The dialling code `91`, bare or already prefixed with `+`.
    CountryCode,
    /// `male` / `female` in any casing.
    Gender,
    /// `mr`, `mr.`, `ms`, `ms.` in any casing.
    Title,
    /// Numeric canonicalisation, the fallback.
    Numeric,
}

const IDENTITY_RULES: &[CellRule] = &[
    CellRule::AadharNumber,
    CellRule::PanNumber,
    CellRule::CountryCode,
    CellRule::Gender,
    CellRule::Title,
    CellRule::Numeric,
];

const STANDARD_RULES: &[CellRule] = &[
    CellRule::CountryCode,
    CellRule::Gender,
    CellRule::Title,
    CellRule::Numeric,
];

impl CellRule {
    /// Returns `true` when the rule claims the cleaned value.
    pub fn matches(self, value: &str, column: &str) -> bool {
        match self {
            CellRule::AadharNumber => {
                column.to_uppercase().contains("AADHAR")
                    || (is_all_digits(value) && value.chars().count() <= AADHAR_WIDTH)
            }
            CellRule::PanNumber => {
                column.to_uppercase().contains("PAN")
                    || (value.chars().count() == PAN_LENGTH
                        && value.chars().all(char::is_alphanumeric))
            }
            CellRule::CountryCode => matches!(value, "91" | "+91"),
            CellRule::Gender => matches!(value.to_lowercase().as_str(), "male" | "female"),
            CellRule::Title => matches!(value.to_lowercase().as_str(), "mr" | "mr." | "ms" | "ms."),
            CellRule::Numeric => true,
        }
    }

    /// Produces the normalised value. Only meaningful after [`Self::matches`].
    pub fn apply(self, value: &str) -> String {
        match self {
            CellRule::AadharNumber if is_all_digits(value) => {
                format!("{value:0>width$}", width = AADHAR_WIDTH)
            }
            CellRule::AadharNumber => value.to_string(),
            CellRule::PanNumber | CellRule::Gender => value.to_uppercase(),
            CellRule::CountryCode => "+91".to_string(),
            CellRule::Title => value.trim_end_matches('.').to_uppercase(),
            CellRule::Numeric => canonicalize_number(value),
        }
    }
}

/// Returns the ordered rule list for a sheet.
pub fn rules_for_sheet(sheet: &str) -> &'static [CellRule] {
    if is_identity_sheet(sheet) {
        IDENTITY_RULES
    } else {
        STANDARD_RULES
    }
}

pub fn is_identity_sheet(sheet: &str) -> bool {
    sheet.to_uppercase() == IDENTITY_SHEET
}

/// Returns the first rule that claims `value` in the given sheet and column.
pub fn select_rule(value: &str, sheet: &str, column: &str) -> CellRule {
    rules_for_sheet(sheet)
        .iter()
        .copied()
        .find(|rule| rule.matches(value, column))
        .unwrap_or(CellRule::Numeric)
}

/// Normalises a single cell. Missing values become an empty string; anything
/// else is cleaned and passed through the sheet's rule list.
pub fn format_cell(value: &CellValue, sheet: &str, column: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format_text(&value.to_string(), sheet, column)
}

/// Cleans and normalises a textual value.
pub fn format_text(raw: &str, sheet: &str, column: &str) -> String {
    let cleaned = clean(raw);
    select_rule(&cleaned, sheet, column).apply(&cleaned)
}

/// Removes commas and collapses whitespace runs into single spaces, dropping
/// leading and trailing whitespace.
pub fn clean(raw: &str) -> String {
    raw.replace(',', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonicalises numeric-looking text.
///
/// All-zero (and empty) values collapse to `0` and integer codes with a
/// leading zero are preserved. Integral numbers lose their fraction; other
/// numbers are rounded to two decimals. Non-numeric text is
/// returned unchanged.
pub fn canonicalize_number(value: &str) -> String {
    if value.trim_start_matches('0').is_empty() {
        return "0".to_string();
    }
    if value.starts_with('0') && !value.contains('.') {
        return value.to_string();
    }

    match value.parse::<f64>() {
        Ok(number) if number.is_nan() => "nan".to_string(),
        Ok(number) if number.is_infinite() && number.is_sign_positive() => "inf".to_string(),
        Ok(number) if number.is_infinite() => "-inf".to_string(),
        // Negative zero renders as plain zero.
        Ok(number) if number == 0.0 => "0".to_string(),
        Ok(number) if number.fract() == 0.0 => format!("{number:.0}"),
        Ok(number) => format!("{number:.2}"),
        Err(_) => value.to_string(),
    }
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

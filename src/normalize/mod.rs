//! Cell-level normalisation: date reformatting and value rules.

pub mod date;
pub mod value;

pub use date::format_date;
pub use value::{CellRule, format_cell};

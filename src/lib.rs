//! Core library for the sheetpipe command line application.
//!
//! The library turns spreadsheet workbooks into pipe-delimited text. Reading
//! and writing live under [`io`], the per-cell rules in [`normalize`], the
//! per-sheet pass in [`flatten`], and the end-to-end conversion in
//! [`convert`]. [`outputs`] names and expires converted files for callers that
//! keep them in a shared directory.

pub mod convert;
pub mod error;
pub mod flatten;
pub mod io;
pub mod model;
pub mod normalize;
pub mod outputs;

pub use convert::{ConversionOutcome, convert};
pub use error::{Result, ToolError};

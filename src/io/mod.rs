pub mod excel_read;
pub mod text_write;

//! Validation modules

pub mod file_name;

pub use file_name::{validate_file_name, MAX_FILE_NAME_LENGTH};

pub mod error;
pub mod format;
pub mod json_utils;

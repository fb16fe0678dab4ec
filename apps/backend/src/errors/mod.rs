//! Error handling for the mini-app backend.

pub mod error_code;

pub use error_code::ErrorCode;

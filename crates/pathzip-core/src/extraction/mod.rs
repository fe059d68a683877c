//! Archive extraction module.
//!
//! Unpacks a ZIP archive under a target root, validating every stored name
//! before anything is written.

pub mod zip;

pub use self::zip::extract_zip;
pub use self::zip::extract_zip_with_progress;

//! Round-trip a filesystem path through a ZIP archive.
//!
//! `pathzip-core` compresses a directory tree (or a single file) into a ZIP
//! archive, and unpacks such an archive back onto disk. Directory markers and
//! unix permission bits survive the round trip, and every stored name is
//! validated before it is joined onto the extraction root.
//!
//! # Examples
//!
//! ```no_run
//! use pathzip_core::ExtractionConfig;
//! use pathzip_core::creation::CreationConfig;
//! use pathzip_core::create_zip;
//! use pathzip_core::extract_zip;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let outcome = create_zip("photos", "photos.zip", &CreationConfig::default())?;
//! println!("Archived {} entries", outcome.entry_count());
//!
//! let report = extract_zip("photos.zip", "restore", &ExtractionConfig::default())?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```
//!
//! [`Job`] picks the operation from the source path the same way the
//! `pathzip` binary does.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod report;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use api::Job;
pub use api::JobOutcome;
pub use api::Operation;
pub use config::ExtractionConfig;
pub use creation::ArchiveOutcome;
pub use creation::CreationConfig;
pub use creation::CreationReport;
pub use creation::zip::create_zip;
pub use error::ArchiveError;
pub use error::Result;
pub use extraction::extract_zip;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use types::DestDir;
pub use types::EntryPath;

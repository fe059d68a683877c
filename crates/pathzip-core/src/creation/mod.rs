//! Archive creation module.
//!
//! Walks a directory or single file and writes it into a ZIP archive whose
//! entry names are rooted at the source's base directory name.

pub mod config;
pub mod report;
pub mod walker;
pub mod zip;

// Re-exports for public API
pub use config::CreationConfig;
pub use report::ArchiveOutcome;
pub use report::CreationReport;
pub use walker::EntryKind;
pub use walker::SourceWalker;
pub use walker::WalkedEntry;

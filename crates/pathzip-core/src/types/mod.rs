//! Validated path types used during extraction.
//!
//! Both types can only be built through their validating constructors, so a
//! value of either type is proof that the check already ran.

pub mod dest_dir;
pub mod entry_path;

pub use dest_dir::DestDir;
pub use entry_path::EntryPath;

//! CBZ metadata plumbing.
//!
//! Comic archives are plain zip files with a well-known `ComicInfo.xml`
//! entry describing series/issue metadata. This crate extracts that entry
//! into memory, parses the fields the matcher needs, rewrites individual
//! fields without disturbing the rest of the document, and swaps the entry
//! back into the archive while copying every other entry byte-for-byte.

pub mod cbz;
pub mod comicinfo;
pub mod error;

pub use cbz::{METADATA_ENTRY, read_metadata, replace_metadata};
pub use comicinfo::{ComicInfoSheet, FieldEdit, MetadataProvider, parse, rewrite};
pub use error::ArchiveError;

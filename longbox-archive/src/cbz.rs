//! Reading and replacing the metadata entry of a CBZ archive.

use std::fs;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::result::ZipError;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::ArchiveError;

/// The well-known name of the metadata entry inside a comic archive.
pub const METADATA_ENTRY: &str = "ComicInfo.xml";

/// Extract the metadata entry of a comic archive into memory.
pub fn read_metadata(path: &Path) -> Result<Vec<u8>, ArchiveError> {
    let file = fs::File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut entry = match archive.by_name(METADATA_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ArchiveError::MissingEntry {
                entry: METADATA_ENTRY,
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    let mut payload = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut payload)?;
    Ok(payload)
}

/// Replace the metadata entry of a comic archive, leaving every other
/// entry byte-identical.
///
/// The archive is rebuilt in memory with raw per-entry copies (no
/// recompression, timestamps preserved) and only written over the
/// original once the rebuild has succeeded.
pub fn replace_metadata(path: &Path, payload: &[u8]) -> Result<(), ArchiveError> {
    let file = fs::File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let mut out = ZipWriter::new(Cursor::new(Vec::new()));
    out.set_raw_comment(archive.comment().to_vec().into());

    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        if entry.name() == METADATA_ENTRY {
            continue;
        }
        out.raw_copy_file(entry)?;
    }

    out.start_file(
        METADATA_ENTRY,
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated),
    )?;
    out.write_all(payload)?;

    let cursor = out.finish()?;
    // the source handle must be closed before the path is overwritten
    drop(archive);
    fs::write(path, cursor.into_inner())?;
    Ok(())
}

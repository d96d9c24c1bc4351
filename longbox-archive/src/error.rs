use std::path::PathBuf;

/// Errors that can occur while reading or rewriting comic archives.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("No {entry} entry in {}", .path.display())]
    MissingEntry { entry: &'static str, path: PathBuf },

    #[error("Malformed metadata payload: {0}")]
    MalformedPayload(String),
}

impl ArchiveError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }
}

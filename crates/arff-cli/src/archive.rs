//! Zip packaging of split files.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::pipeline::SplitBundle;

/// Download name of the packaged splits.
pub const ARCHIVE_NAME: &str = "nsl_kdd_splits.zip";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to build zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Package the bundle as an in-memory zip.
///
/// Entries are deflated and written as train, validation, test.
pub fn write_archive(bundle: &SplitBundle) -> Result<Vec<u8>, ArchiveError> {
    let mut buffer = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for file in bundle.iter() {
            writer.start_file(file.name, options)?;
            writer
                .write_all(file.text.as_bytes())
                .map_err(zip::result::ZipError::Io)?;
            debug!(entry = file.name, bytes = file.text.len(), "added archive entry");
        }
        writer.finish()?;
    }
    Ok(buffer)
}

/// Write the archive to `path`.
pub fn save_archive(bundle: &SplitBundle, path: &Path) -> Result<(), ArchiveError> {
    let bytes = write_archive(bundle)?;
    fs::write(path, &bytes).map_err(|e| ArchiveError::write(path, e))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote split archive");
    Ok(())
}

/// Write the three files side by side into `dir`, creating it if needed.
pub fn save_files(bundle: &SplitBundle, dir: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(dir).map_err(|e| ArchiveError::write(dir, e))?;
    for file in bundle.iter() {
        let path = dir.join(file.name);
        fs::write(&path, file.text.as_bytes()).map_err(|e| ArchiveError::write(&path, e))?;
        info!(path = %path.display(), "wrote split file");
    }
    Ok(())
}

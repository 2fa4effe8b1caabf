use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::ExportError;

/// File name used when the report destination is a directory.
pub const REPORT_FILE_NAME: &str = "training_evaluation_report.pdf";

/// File name used when the summary destination is a directory.
pub const SUMMARY_FILE_NAME: &str = "training_evaluation_summary.json";

/// Final path of the report for a requested output: directories get
/// [`REPORT_FILE_NAME`] appended, anything else is used as is.
pub fn resolve_destination(output: &Path) -> PathBuf {
    resolve_in_dir(output, REPORT_FILE_NAME)
}

/// Like [`resolve_destination`], with [`SUMMARY_FILE_NAME`] for directories.
pub fn resolve_summary_destination(output: &Path) -> PathBuf {
    resolve_in_dir(output, SUMMARY_FILE_NAME)
}

fn resolve_in_dir(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// Bytes written to a temporary file next to their destination, not yet
/// visible there.
///
/// Dropping a staged file without committing it removes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    tmp: NamedTempFile,
    destination: PathBuf,
}

impl StagedFile {
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Rename the temporary file onto the destination.
    pub fn commit(self) -> Result<PathBuf, ExportError> {
        let Self { tmp, destination } = self;
        let len = tmp.as_file().metadata().map(|m| m.len()).unwrap_or_default();
        tmp.persist(&destination)
            .map_err(|e| write_error(&destination, e.error))?;

        info!(path = %destination.display(), bytes = len, "wrote output file");
        Ok(destination)
    }
}

/// Write `bytes` to a temporary file in the directory of `destination`.
///
/// `suffix` names the temporary file so leftovers are recognisable.
pub fn stage(bytes: &[u8], destination: &Path, suffix: &str) -> Result<StagedFile, ExportError> {
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".traineval-")
        .suffix(suffix)
        .tempfile_in(dir)
        .map_err(|e| write_error(destination, e))?;
    tmp.write_all(bytes).map_err(|e| write_error(destination, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_error(destination, e))?;

    Ok(StagedFile {
        tmp,
        destination: destination.to_path_buf(),
    })
}

/// Write the report to `output`.
///
/// The bytes go to a temporary file next to the destination, which is then
/// renamed into place. On any failure the temporary file is removed and the
/// destination is left untouched.
pub fn deliver(bytes: &[u8], output: &Path) -> Result<PathBuf, ExportError> {
    stage(bytes, &resolve_destination(output), ".pdf.tmp")?.commit()
}

fn write_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Write {
        path: path.display().to_string(),
        source,
    }
}

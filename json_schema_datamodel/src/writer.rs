//! All-or-nothing output of rendered files.

use std::path::{Path, PathBuf};

use crate::error::GenerationError;
use crate::render::RenderedFile;

/// Write `files` into `output_directory`, creating it if needed. Every target
/// is checked before anything is written, so a refused run leaves the
/// directory untouched.
///
/// # Errors
///
/// Returns `GenerationError::OutputExists` listing every pre-existing target
/// when `force_overwrite` is false, or `GenerationError::Io` if creating the
/// directory or writing a file fails.
pub fn write_files(
    files: &[RenderedFile],
    output_directory: &Path,
    force_overwrite: bool,
) -> Result<Vec<PathBuf>, GenerationError> {
    let targets: Vec<PathBuf> = files
        .iter()
        .map(|file| output_directory.join(&file.file_name))
        .collect();

    let existing: Vec<PathBuf> = targets.iter().filter(|p| p.exists()).cloned().collect();
    if !existing.is_empty() {
        if !force_overwrite {
            return Err(GenerationError::OutputExists { paths: existing });
        }
        tracing::warn!(count = existing.len(), "overwriting existing output files");
    }

    std::fs::create_dir_all(output_directory)?;
    for (file, target) in files.iter().zip(&targets) {
        std::fs::write(target, &file.contents)?;
        tracing::debug!(path = %target.display(), "wrote file");
    }
    tracing::info!(
        files = targets.len(),
        directory = %output_directory.display(),
        "wrote generated sources"
    );
    Ok(targets)
}

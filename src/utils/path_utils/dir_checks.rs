use std::fs;
use std::path::PathBuf;

/// clap value parser for `--staging-dir`.
///
/// The staging directory is both the upload source and the download
/// destination, so it is created when missing and must accept new files.
pub fn check_staging_dir(value: &str) -> Result<PathBuf, String> {
    if value.trim().is_empty() {
        return Err("Staging directory must not be empty.".to_string());
    }
    let dir = PathBuf::from(value);

    fs::create_dir_all(&dir).map_err(|e| {
        format!(
            "Cannot create staging directory '{}': {}",
            dir.display(),
            e
        )
    })?;

    let meta = fs::metadata(&dir)
        .map_err(|e| format!("Cannot inspect '{}': {}", dir.display(), e))?;
    if !meta.is_dir() {
        return Err(format!("'{}' is not a directory.", dir.display()));
    }

    // Downloads are staged as hidden siblings; check with the same kind of file
    tempfile::Builder::new()
        .prefix(".download-")
        .tempfile_in(&dir)
        .map_err(|e| {
            format!(
                "Staging directory '{}' does not accept downloads: {}",
                dir.display(),
                e
            )
        })?;

    Ok(dir)
}

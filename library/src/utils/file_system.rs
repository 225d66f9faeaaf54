use crate::error::TracerError;
use std::fs;
use std::path::Path;

pub(crate) fn ensure_folders_exist(file_path: &impl AsRef<Path>) -> Result<(), TracerError> {
    if let Some(parent_dir) = file_path.as_ref().parent() {
        fs::create_dir_all(parent_dir)?;
    }
    Ok(())
}

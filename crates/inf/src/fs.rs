use std::path::Path;

use crate::{Error, Result};

pub fn create_directory_for_file(p: &Path) -> Result {
    if let Some(parent_dir) = p.parent() {
        std::fs::create_dir_all(parent_dir).map_err(|e| {
            Error::Runtime(format!(
                "Failed to create output directory for file '{}' ({e})",
                p.to_string_lossy()
            ))
        })?;
    }

    Ok(())
}

/// Move a finished file into place, replacing `to` when it already exists.
pub fn replace_file(from: &Path, to: &Path) -> Result {
    std::fs::rename(from, to).map_err(|e| {
        Error::Runtime(format!(
            "Failed to move '{}' to '{}' ({e})",
            from.to_string_lossy(),
            to.to_string_lossy()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_directory_for_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a").join("b").join("out.bin");

        create_directory_for_file(&file).unwrap();
        assert!(file.parent().unwrap().is_dir());
    }

    #[test]
    fn replace_file_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("new.txt");
        let to = dir.path().join("old.txt");
        std::fs::write(&from, b"new").unwrap();
        std::fs::write(&to, b"old").unwrap();

        replace_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"new");
    }
}

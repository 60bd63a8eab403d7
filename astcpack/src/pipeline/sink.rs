//! File sink for assembled containers.

use std::fs;
use std::io;
use std::path::Path;

/// Write `bytes` to `path`, replacing any existing file.
///
/// The data lands in a temporary sibling file first and is renamed into
/// place, so a failed write never leaves a partial container at `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, bytes)?;
    if let Err(error) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_file_with_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("texture.astc");

        write_atomic(&path, &[1, 2, 3, 4]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("texture.astc");

        write_atomic(&path, &[0xFF; 64]).unwrap();
        write_atomic(&path, &[1, 2]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_write_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/texture.astc");

        write_atomic(&path, &[9]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![9]);
    }

    #[test]
    fn test_no_temp_file_remains() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("texture.astc");

        write_atomic(&path, &[5; 32]).unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["texture.astc"]);
    }
}

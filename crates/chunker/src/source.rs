//! Locating and reading source documents.

use docslice_core::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::types::ChunkerInput;

/// Extensions picked up when walking directories, unless overridden.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "txt"];

/// Expand files and directories into a sorted, de-duplicated file list.
///
/// Explicit file paths are always kept. Directory entries are kept only when
/// their extension is in `extensions` (case-insensitive).
pub fn collect_sources(paths: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let entry_path = entry.path();
                if entry_path.is_file() && has_extension(entry_path, extensions) {
                    files.push(entry_path.to_path_buf());
                }
            }
        } else {
            tracing::warn!("Skipping missing path: {:?}", path);
        }
    }

    files.sort();
    files.dedup();
    files
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Read a text file into a chunker input named after the file.
pub fn load_source(path: &Path) -> AppResult<ChunkerInput> {
    let raw = fs::read(path)?;
    let text = String::from_utf8(raw).map_err(|_| {
        AppError::Chunking(format!("{} is not valid UTF-8 text", path.display()))
    })?;

    if text.contains('\0') {
        return Err(AppError::Chunking(format!(
            "{} looks like a binary file",
            path.display()
        )));
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(ChunkerInput::new(text.replace("\r\n", "\n"), filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collect_filters_directory_entries() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("a.md"), "# A").unwrap();
        fs::write(nested.join("b.TXT"), "b").unwrap();
        fs::write(nested.join("c.pdf"), "c").unwrap();

        let files = collect_sources(&[temp.path().to_path_buf()], &exts(DEFAULT_EXTENSIONS));
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "b.TXT"]);
    }

    #[test]
    fn test_collect_keeps_explicit_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.rst");
        fs::write(&file, "text").unwrap();

        let files = collect_sources(&[file.clone(), file.clone()], &exts(&["md"]));
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_collect_skips_missing() {
        let temp = TempDir::new().unwrap();
        let files = collect_sources(&[temp.path().join("nope")], &exts(&["md"]));
        assert!(files.is_empty());
    }

    #[test]
    fn test_load_source() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("guide.md");
        fs::write(&file, "# Title\r\nBody.\r\n").unwrap();

        let input = load_source(&file).unwrap();
        assert_eq!(input.metadata.filename, "guide.md");
        assert_eq!(input.text, "# Title\nBody.\n");
    }

    #[test]
    fn test_load_rejects_binary() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("blob.md");
        fs::write(&file, [0x23u8, 0x00, 0x41]).unwrap();
        assert!(load_source(&file).is_err());

        fs::write(&file, [0xffu8, 0xfe, 0x00]).unwrap();
        assert!(load_source(&file).is_err());
    }
}

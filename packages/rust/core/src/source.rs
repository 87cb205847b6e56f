//! Document sources.
//!
//! The aggregator works against [`DocumentRef`] so filesystem concerns stay
//! out of the parsing core; [`FileDocument`] is the ordinary on-disk source.

use std::path::{Path, PathBuf};

use partnerboard_shared::{PartnerBoardError, Result};

/// A readable profile document with a stable identifier.
pub trait DocumentRef {
    /// Stable identifier (the file name for on-disk sources).
    fn id(&self) -> &str;

    /// Read the full document text.
    fn read(&self) -> Result<String>;
}

/// A profile document on disk.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    id: String,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, id }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentRef for FileDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| PartnerBoardError::io(&self.path, e))
    }
}

/// List the `.md` profile files in a data directory, sorted by file name.
///
/// Sorting keeps batch processing order (and therefore mapping output)
/// deterministic across runs.
pub fn list_profile_files(data_dir: &Path) -> Result<Vec<FileDocument>> {
    let entries = std::fs::read_dir(data_dir).map_err(|e| PartnerBoardError::io(data_dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == "md")
        })
        .collect();

    files.sort();

    Ok(files.into_iter().map(FileDocument::new).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_profile_files_sorted_md_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.md"), "x").unwrap();
        std::fs::write(dir.path().join("a.md"), "x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("sub.md")).unwrap();

        let files = list_profile_files(dir.path()).expect("list");
        let ids: Vec<&str> = files.iter().map(|f| f.id()).collect();
        assert_eq!(ids, ["a.md", "b.md"]);
    }

    #[test]
    fn file_document_reads_utf8_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("acme.md");
        std::fs::write(&path, "# パートナー名\nAcme\n").unwrap();

        let doc = FileDocument::new(&path);
        assert_eq!(doc.id(), "acme.md");
        assert!(doc.read().expect("read").contains("Acme"));
    }

    #[test]
    fn missing_file_surfaces_io_error_with_path() {
        let doc = FileDocument::new("/no/such/dir/ghost.md");
        let err = doc.read().expect_err("should fail");
        assert!(err.to_string().contains("ghost.md"));
    }

    #[test]
    fn missing_data_dir_is_an_error() {
        assert!(list_profile_files(Path::new("/no/such/dir")).is_err());
    }
}

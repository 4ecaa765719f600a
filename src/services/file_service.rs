use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::errors::ServeError;
use crate::types::DocumentRef;

/// Service for catalog and storage operations on the served tree
#[derive(Clone)]
pub struct FileService {
    root_dir: PathBuf,
    extension: String,
    excluded_dirs: Vec<String>,
}

impl FileService {
    /// Create a new file service over the configured root
    pub fn new(config: &Config) -> Self {
        debug!("Creating FileService with root directory: {:?}", config.root_dir);
        Self {
            root_dir: config.root_dir.as_ref().clone(),
            extension: config.extension.clone(),
            excluded_dirs: config.excluded_dirs.clone(),
        }
    }

    /// Walk the root and collect every matching document, sorted by
    /// root-relative path so repeated listings of an unchanged tree are
    /// byte-identical.
    ///
    /// Excluded directories are pruned before descent; their contents are
    /// never visited. An unreadable subdirectory is skipped with a warning
    /// rather than failing the whole listing.
    pub fn list_documents(&self) -> Result<Vec<DocumentRef>, ServeError> {
        let mut docs = Vec::new();
        let walker = WalkDir::new(&self.root_dir)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry during listing: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.matches_extension(entry.path()) {
                continue;
            }
            let rel = match entry.path().strip_prefix(&self.root_dir) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            let path = rel_display(rel);
            let dir = match path.rsplit_once('/') {
                Some((parent, _)) => parent.to_string(),
                None => ".".to_string(),
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            docs.push(DocumentRef {
                name: entry.file_name().to_string_lossy().to_string(),
                path,
                dir,
                size,
            });
        }

        docs.sort_by(|a, b| a.path.cmp(&b.path));
        info!("Listed {} documents under {:?}", docs.len(), self.root_dir);
        Ok(docs)
    }

    /// Read a document as UTF-8 text
    pub fn read_document(&self, path: &Path) -> Result<String, ServeError> {
        debug!("Reading document: {:?}", path);
        if !path.is_file() {
            warn!("Document does not exist: {:?}", path);
            return Err(ServeError::NotFound);
        }
        let content = fs::read_to_string(path)?;
        debug!("Read {} bytes from {:?}", content.len(), path);
        Ok(content)
    }

    /// Write a document, creating missing parent directories first.
    /// Concurrent saves of the same document race at the filesystem level;
    /// last write wins.
    pub fn write_document(&self, path: &Path, content: &str) -> Result<(), ServeError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Wrote {} bytes to {:?}", content.len(), path);
        Ok(())
    }

    fn is_excluded_dir(&self, entry: &walkdir::DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .excluded_dirs
                .iter()
                .any(|name| entry.file_name() == name.as_str())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

/// Root-relative path with forward-slash separators on every platform
fn rel_display(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn service_for(root: &Path) -> FileService {
        FileService::new(&Config::with_root(root.canonicalize().unwrap(), 0))
    }

    fn seed(root: &Path) {
        fs::create_dir_all(root.join("notes")).unwrap();
        fs::write(root.join("notes/todo.md"), "# Hi\n").unwrap();
        fs::write(root.join("readme.md"), "top\n").unwrap();
        fs::write(root.join("notes/image.png"), [0u8, 1, 2]).unwrap();
    }

    #[test]
    fn lists_documents_sorted_with_metadata() {
        let tmp = tempdir().unwrap();
        seed(tmp.path());
        let docs = service_for(tmp.path()).list_documents().unwrap();

        let paths: Vec<&str> = docs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["notes/todo.md", "readme.md"]);

        assert_eq!(docs[0].name, "todo.md");
        assert_eq!(docs[0].dir, "notes");
        assert_eq!(docs[0].size, 5);
        assert_eq!(docs[1].dir, ".");
    }

    #[test]
    fn repeated_listings_are_identical() {
        let tmp = tempdir().unwrap();
        seed(tmp.path());
        let service = service_for(tmp.path());
        assert_eq!(service.list_documents().unwrap(), service.list_documents().unwrap());
    }

    #[test]
    fn excluded_directories_are_pruned() {
        let tmp = tempdir().unwrap();
        seed(tmp.path());
        for dir in [".git", "node_modules", "__pycache__", ".venv", "venv"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
            fs::write(tmp.path().join(dir).join("hidden.md"), "x").unwrap();
        }
        // Exclusion applies at any depth, not just the top level
        fs::create_dir_all(tmp.path().join("notes/node_modules")).unwrap();
        fs::write(tmp.path().join("notes/node_modules/dep.md"), "x").unwrap();

        let docs = service_for(tmp.path()).list_documents().unwrap();
        let paths: Vec<&str> = docs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["notes/todo.md", "readme.md"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("NOTES.MD"), "x").unwrap();
        let docs = service_for(tmp.path()).list_documents().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "NOTES.MD");
    }

    #[test]
    fn write_then_read_round_trips_exactly() {
        let tmp = tempdir().unwrap();
        let service = service_for(tmp.path());
        let target = tmp.path().join("draft.md");
        let content = "line one\nline two \n\ttabbed\n\n";
        service.write_document(&target, content).unwrap();
        assert_eq!(service.read_document(&target).unwrap(), content);
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let tmp = tempdir().unwrap();
        let service = service_for(tmp.path());
        let target = tmp.path().join("new/deep/page.md");
        service.write_document(&target, "hello").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn write_overwrites_existing_content() {
        let tmp = tempdir().unwrap();
        let service = service_for(tmp.path());
        let target = tmp.path().join("page.md");
        service.write_document(&target, "first").unwrap();
        service.write_document(&target, "second").unwrap();
        assert_eq!(service.read_document(&target).unwrap(), "second");
    }

    #[test]
    fn read_missing_document_is_not_found() {
        let tmp = tempdir().unwrap();
        let service = service_for(tmp.path());
        assert!(matches!(
            service.read_document(&tmp.path().join("missing.md")),
            Err(ServeError::NotFound)
        ));
    }

    #[test]
    fn read_directory_target_is_not_found() {
        let tmp = tempdir().unwrap();
        seed(tmp.path());
        let service = service_for(tmp.path());
        assert!(matches!(
            service.read_document(&tmp.path().join("notes")),
            Err(ServeError::NotFound)
        ));
    }

    #[test]
    fn read_non_utf8_document_is_io_error() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("binary.md");
        fs::write(&target, [0xFFu8, 0xFE, 0x00]).unwrap();
        let service = service_for(tmp.path());
        assert!(matches!(
            service.read_document(&target),
            Err(ServeError::Io(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_does_not_fail_listing() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        seed(tmp.path());
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("inside.md"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // When running unprivileged the locked directory is skipped; as root
        // the chmod has no effect. Either way the listing must succeed and
        // still carry the readable documents.
        let result = service_for(tmp.path()).list_documents();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let docs = result.unwrap();
        assert!(docs.iter().any(|d| d.path == "notes/todo.md"));
        assert!(docs.iter().any(|d| d.path == "readme.md"));
    }
}

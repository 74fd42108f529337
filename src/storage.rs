//! Local storage for downloaded documents and cache introspection.
//!
//! Downloads live under the platform data directory, the client's cache under
//! the platform cache directory, both in a `folio` subdirectory. Size
//! reporting only reads; missing directories count as empty.

use bytesize::ByteSize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{classify_io_error, FolioResult, SystemError};

/// Subdirectory used inside the platform cache and data directories.
pub const APP_DIR_NAME: &str = "folio";

/// Extension used for downloaded documents.
const DOCUMENT_EXTENSION: &str = "pdf";

/// Snapshot of on-disk usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageReport {
    pub cache_bytes: u64,
    pub documents_bytes: u64,
    pub document_count: usize,
}

impl StorageReport {
    pub fn total_bytes(&self) -> u64 {
        self.cache_bytes + self.documents_bytes
    }

    pub fn human_cache(&self) -> String {
        ByteSize::b(self.cache_bytes).to_string()
    }

    pub fn human_documents(&self) -> String {
        ByteSize::b(self.documents_bytes).to_string()
    }

    pub fn human_total(&self) -> String {
        ByteSize::b(self.total_bytes()).to_string()
    }
}

/// Total size and number of regular files below `path`.
fn directory_usage(path: &Path, include: impl Fn(&Path) -> bool) -> (u64, usize) {
    if !path.exists() {
        return (0, 0);
    }
    WalkDir::new(path)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && include(e.path()))
        .filter_map(|e| e.metadata().ok())
        .fold((0, 0), |(bytes, files), meta| (bytes + meta.len(), files + 1))
}

fn is_document(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION)
}

/// Map a content id to a safe file stem.
fn file_stem(content_id: &str) -> String {
    let stem: String = content_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageManager {
    cache_dir: PathBuf,
    documents_dir: PathBuf,
}

impl StorageManager {
    pub fn new(cache_dir: impl Into<PathBuf>, documents_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            documents_dir: documents_dir.into(),
        }
    }

    /// Use the platform cache and data directories.
    pub fn from_platform() -> FolioResult<Self> {
        let cache = dirs::cache_dir().ok_or(SystemError::NoCacheDirectory)?;
        let data = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(SystemError::NoHomeDirectory)?;
        Ok(Self::new(cache.join(APP_DIR_NAME), data.join(APP_DIR_NAME)))
    }

    /// Place both directories under one root, e.g. a temp dir in tests.
    pub fn under(root: &Path) -> Self {
        Self::new(root.join("cache"), root.join("documents"))
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    pub fn report(&self) -> StorageReport {
        let (cache_bytes, _) = directory_usage(&self.cache_dir, |_| true);
        // leftover .part files from interrupted saves are not documents
        let (documents_bytes, document_count) = directory_usage(&self.documents_dir, is_document);
        StorageReport {
            cache_bytes,
            documents_bytes,
            document_count,
        }
    }

    pub fn document_path(&self, content_id: &str) -> PathBuf {
        self.documents_dir
            .join(format!("{}.{}", file_stem(content_id), DOCUMENT_EXTENSION))
    }

    pub fn has_document(&self, content_id: &str) -> bool {
        self.document_path(content_id).is_file()
    }

    /// Write a downloaded document, replacing any earlier copy.
    ///
    /// The bytes go to a sibling `.part` file first so a crash never leaves
    /// a truncated document under the final name.
    pub fn save_document(&self, content_id: &str, data: &[u8]) -> FolioResult<PathBuf> {
        fs::create_dir_all(&self.documents_dir).map_err(|e| {
            SystemError::DirectoryCreationFailed {
                path: self.documents_dir.clone(),
                message: e.to_string(),
            }
        })?;

        let path = self.document_path(content_id);
        let partial = path.with_extension("part");
        let saved = fs::write(&partial, data)
            .map_err(|e| classify_io_error(e, Some(partial.clone()), "write"))
            .and_then(|()| {
                fs::rename(&partial, &path)
                    .map_err(|e| classify_io_error(e, Some(path.clone()), "rename"))
            });
        if let Err(e) = saved {
            let _ = fs::remove_file(&partial);
            return Err(e.into());
        }

        tracing::info!("Saved {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }

    /// Delete a downloaded document. Returns false if there was none.
    pub fn remove_document(&self, content_id: &str) -> FolioResult<bool> {
        let path = self.document_path(content_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| classify_io_error(e, Some(path), "delete"))?;
        Ok(true)
    }

    /// Empty the cache directory, keeping the directory itself. Returns the
    /// number of bytes freed.
    pub fn clear_cache(&self) -> FolioResult<u64> {
        let (freed, _) = directory_usage(&self.cache_dir, |_| true);
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(classify_io_error(e, Some(self.cache_dir.clone()), "read").into())
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| classify_io_error(e, Some(path), "delete"))?;
        }

        tracing::info!("Cleared {} of cache", ByteSize::b(freed));
        Ok(freed)
    }
}

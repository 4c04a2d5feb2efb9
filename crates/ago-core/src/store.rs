use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::documents::DocumentList;
use crate::error::{DocumentError, StorageError};
use crate::words::{DocumentId, WordIndex};

const WORDS_FILE: &str = "words";
const DOCS_DIR: &str = "docs";
const DOCS_INFO_FILE: &str = "info";
const DOC_DIR_PREFIX: &str = "doc";
const PRIVATE_DIR_MODE: u32 = 0o700;
const PRIVATE_FILE_MODE: u32 = 0o600;

/// On-disk home of the word index, the document list and document copies.
///
/// ```text
/// <root>/words
/// <root>/docs/info
/// <root>/docs/doc<id>/<file name>
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open a store, creating its directories on first use
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self { root: root.into() };
        let docs_dir = store.docs_dir();
        if !docs_dir.exists() {
            tracing::debug!("creating storage directory {}", docs_dir.display());
        }
        fs::create_dir_all(&docs_dir).map_err(|source| StorageError::Io {
            path: docs_dir,
            source,
        })?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn docs_dir(&self) -> PathBuf {
        self.root.join(DOCS_DIR)
    }

    pub fn words_path(&self) -> PathBuf {
        self.root.join(WORDS_FILE)
    }

    pub fn documents_path(&self) -> PathBuf {
        self.docs_dir().join(DOCS_INFO_FILE)
    }

    pub fn document_dir(&self, id: DocumentId) -> PathBuf {
        self.docs_dir().join(format!("{DOC_DIR_PREFIX}{id}"))
    }

    pub fn load_words(&self) -> Result<WordIndex, StorageError> {
        load_json(&self.words_path())
    }

    pub fn save_words(&self, words: &WordIndex) -> Result<(), StorageError> {
        save_json(&self.words_path(), words)
    }

    pub fn load_documents(&self) -> Result<DocumentList, StorageError> {
        load_json(&self.documents_path())
    }

    pub fn save_documents(&self, documents: &DocumentList) -> Result<(), StorageError> {
        save_json(&self.documents_path(), documents)
    }

    /// Read a source document in full
    pub fn read_all_text(path: &Path) -> Result<Vec<u8>, DocumentError> {
        fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => DocumentError::NotFound(path.to_path_buf()),
            _ => DocumentError::Read {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    /// Keep a copy of a source document under its id. Returns the copy's path.
    pub fn import_document(
        &self,
        id: DocumentId,
        source: &Path,
        contents: &[u8],
    ) -> Result<PathBuf, DocumentError> {
        let name = source
            .file_name()
            .ok_or_else(|| DocumentError::InvalidName(source.to_path_buf()))?;
        let dir = self.document_dir(id);
        fs::create_dir_all(&dir).map_err(|source| DocumentError::Write {
            path: dir.clone(),
            source,
        })?;
        restrict_permissions(&dir, PRIVATE_DIR_MODE)?;

        let target = dir.join(name);
        fs::write(&target, contents).map_err(|source| DocumentError::Write {
            path: target.clone(),
            source,
        })?;
        restrict_permissions(&target, PRIVATE_FILE_MODE)?;
        Ok(target)
    }

    /// Delete the stored copy of a document. A copy that is already gone is not an error.
    pub fn remove_document(&self, id: DocumentId) -> Result<(), DocumentError> {
        let dir = self.document_dir(id);
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("document directory {} already missing", dir.display());
                Ok(())
            }
            Err(source) => Err(DocumentError::Write { path: dir, source }),
        }
    }
}

/// Document copies are readable by the owner only, like the JSON files
#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> Result<(), DocumentError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|source| {
        DocumentError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> Result<(), DocumentError> {
    Ok(())
}

/// A missing or blank file reads as an empty collection
fn load_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if bytes.trim_ascii().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write through a temporary file in the same directory, then rename over the target
fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let io_error = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(io_error)?;

    let temp_file = NamedTempFile::new_in(parent).map_err(io_error)?;
    let mut writer = BufWriter::new(&temp_file);
    serde_json::to_writer(&mut writer, value).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_error)?;
    drop(writer);

    temp_file.persist(path).map_err(|e| io_error(e.error))?;
    tracing::debug!("saved {}", path.display());
    Ok(())
}

use crate::editing::Document;
use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Byte storage for documents, addressed relative to some root.
pub trait DocumentStore {
    fn read(&self, path: &RelativePath) -> Result<Vec<u8>, IoError>;
    fn write(&self, path: &RelativePath, bytes: &[u8]) -> Result<(), IoError>;
}

/// Documents stored as files under a notes directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens an existing notes directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, IoError> {
        let root = root.into();
        validate_notes_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentStore for FsStore {
    fn read(&self, path: &RelativePath) -> Result<Vec<u8>, IoError> {
        read_file(path, &self.root)
    }

    fn write(&self, path: &RelativePath, bytes: &[u8]) -> Result<(), IoError> {
        write_file(path, &self.root, bytes)
    }
}

/// Read a document file and return its raw bytes
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<Vec<u8>, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read(&absolute_path).map_err(IoError::Io)
}

/// Write bytes to a document file
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &[u8],
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Loads and decodes a document. Only the read can fail; decoding is total.
pub fn load_document(store: &impl DocumentStore, path: &RelativePath) -> Result<Document, IoError> {
    let bytes = store.read(path)?;
    Ok(Document::from_bytes(&bytes))
}

/// Encodes a document and writes it, stamping a fresh `updated_at`.
pub fn save_document(
    store: &impl DocumentStore,
    path: &RelativePath,
    doc: &Document,
) -> Result<(), IoError> {
    store.write(path, &doc.to_bytes())
}

/// Scan for files with the given extension in the notes directory
pub fn scan_documents(notes_root: &Path, extension: &str) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, extension, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    dir: &Path,
    extension: &str,
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, extension, files)?;
        } else if let Some(ext) = path.extension()
            && ext == extension
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

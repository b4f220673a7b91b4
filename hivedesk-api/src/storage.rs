/// Document blob storage
///
/// Writes uploaded document blobs under a root directory handed to the
/// service at construction time. Storage references are namespaced with the
/// employee id and document type so two employees (or two document types)
/// never collide on a filename.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hivedesk_shared::models::document::DocumentType;
use uuid::Uuid;

/// Error type for blob storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying filesystem write failed
    #[error("Storage write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Blob storage for uploaded documents
///
/// Cheap to clone; the root path is shared.
#[derive(Debug, Clone)]
pub struct DocumentStorage {
    root: Arc<PathBuf>,
}

impl DocumentStorage {
    /// Creates a storage service rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// The storage root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory if it does not exist
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(self.root.as_path()).await?;
        Ok(())
    }

    /// Builds the namespaced storage reference for an upload
    ///
    /// Only the final path component of the client-supplied filename is
    /// used, so a filename cannot escape the storage root.
    pub fn storage_ref(employee_id: Uuid, document_type: DocumentType, filename: &str) -> String {
        let safe_name = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        format!("{}_{}_{}", employee_id, document_type.as_str(), safe_name)
    }

    /// Writes a blob under the given storage reference
    ///
    /// Returns the full path the blob was written to.
    pub async fn save(&self, storage_ref: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.root.join(storage_ref);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

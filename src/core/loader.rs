use crate::error::HostError;
use std::future::Future;
use std::path::Path;
use tracing::debug;

/// Reads the document handed to the application.
pub trait FileLoader {
    fn load(&self, path: &Path) -> impl Future<Output = Result<String, HostError>> + Send;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileLoader;

impl LocalFileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FileLoader for LocalFileLoader {
    async fn load(&self, path: &Path) -> Result<String, HostError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| HostError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), bytes = content.len(), "loaded file");
        Ok(content)
    }
}

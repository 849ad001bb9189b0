use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::{Error, Result};

/// Stores uploaded files and hands back the path clients fetch them from.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store(&self, data: &[u8], original_name: &str) -> Result<String>;
    /// Deletes a file previously returned by `store`. Already gone is fine.
    async fn remove(&self, url: &str) -> Result<()>;
}

const RESUME_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "rtf"];
const RESUME_URL_PREFIX: &str = "/uploads/resumes/";

/// Writes resumes under `{root}/resumes` and returns `/uploads/resumes/{file}`.
/// `root` is the directory served at `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume");
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn check_resume(name: &str, data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(Error::BadRequest("Please select a file to upload".into()));
    }
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !RESUME_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }
    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    Ok(())
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, data: &[u8], original_name: &str) -> Result<String> {
        check_resume(original_name, data)?;

        let dir = self.root.join("resumes");
        fs::create_dir_all(&dir).await?;

        let file_name = format!(
            "{}_{}",
            uuid::Uuid::new_v4().simple(),
            sanitize_file_name(original_name)
        );
        fs::write(dir.join(&file_name), data).await.map_err(|e| {
            tracing::error!(error = %e, file = %file_name, "failed to write resume");
            Error::Storage(format!("Failed to save file: {}", e))
        })?;

        tracing::info!(file = %file_name, bytes = data.len(), "resume stored");
        Ok(format!("{}{}", RESUME_URL_PREFIX, file_name))
    }

    async fn remove(&self, url: &str) -> Result<()> {
        let file_name = url
            .strip_prefix(RESUME_URL_PREFIX)
            .filter(|name| !name.is_empty() && sanitize_file_name(name) == *name)
            .ok_or_else(|| Error::BadRequest(format!("Not a stored resume: {}", url)))?;

        match fs::remove_file(self.root.join("resumes").join(file_name)).await {
            Ok(()) => {
                tracing::info!(file = %file_name, "resume removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!("Failed to remove file: {}", e))),
        }
    }
}

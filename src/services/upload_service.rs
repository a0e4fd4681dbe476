use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Sub-directory of the upload root holding flyers; also the prefix of every
/// stored relative path.
pub const FLYER_DIR: &str = "images/flayers";

/// A file as received from the client.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub data: Bytes,
}

/// A file that passed validation and is ready to be written.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    client_name: String,
    extension: String,
    data: Bytes,
}

#[derive(Clone)]
pub struct UploadService {
    root: PathBuf,
}

fn last_component(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default()
}

/// Keep only the final path component and a conservative character set.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = last_component(name)
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '.' | '_' | '-'))
        .collect();
    cleaned.trim_matches(|c: char| c == '.' || c == '_').to_string()
}

/// Extension of the client's file name, read before any character filtering so
/// names made of non-ASCII characters keep it.
fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = last_component(name).rsplit_once('.')?;
    let ext = ext.trim().to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn matches_signature(ext: &str, data: &[u8]) -> bool {
    match ext {
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8]),
        "gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        _ => false,
    }
}

impl UploadService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Ok(None)` when no file was sent; an empty file input counts as none.
    pub fn validate(&self, file: Option<IncomingFile>) -> Result<Option<PendingUpload>> {
        let Some(file) = file else {
            return Ok(None);
        };
        if file.file_name.trim().is_empty() || file.data.is_empty() {
            return Ok(None);
        }

        let extension = extension_of(&file.file_name).ok_or_else(|| {
            Error::UnsupportedType(format!(
                "Only {} images are accepted",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;
        if !matches_signature(&extension, &file.data) {
            return Err(Error::UnsupportedType(format!(
                "File content is not a valid .{} image",
                extension
            )));
        }

        Ok(Some(PendingUpload {
            client_name: sanitize_filename(&file.file_name),
            extension,
            data: file.data,
        }))
    }

    /// Write a validated upload and return its path relative to the root.
    /// Names combine the owner id with a random suffix so uploads never collide.
    pub async fn store(&self, owner: Uuid, upload: PendingUpload) -> Result<String> {
        let dir = self.root.join(FLYER_DIR);
        fs::create_dir_all(&dir).await?;

        let file_name = format!("{}-{}.{}", owner, Uuid::new_v4().simple(), upload.extension);
        fs::write(dir.join(&file_name), &upload.data).await.map_err(|e| {
            tracing::error!("Failed to write flyer file: {}", e);
            Error::Io(e)
        })?;

        tracing::debug!(client_name = %upload.client_name, stored_as = %file_name, "flyer stored");
        Ok(format!("{}/{}", FLYER_DIR, file_name))
    }

    pub async fn accept(&self, owner: Uuid, file: Option<IncomingFile>) -> Result<Option<String>> {
        match self.validate(file)? {
            Some(upload) => Ok(Some(self.store(owner, upload).await?)),
            None => Ok(None),
        }
    }

    /// Absolute location of a stored relative path. Paths that would escape the
    /// root resolve to nothing.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let rel = Path::new(relative);
        if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(rel))
    }

    /// Best-effort delete. A missing file is not an error; any other failure is
    /// returned so callers can decide whether to log it.
    pub async fn try_remove(&self, relative: &str) -> std::io::Result<()> {
        let Some(path) = self.resolve(relative) else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path escapes upload root",
            ));
        };
        match fs::remove_file(path).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    pub async fn remove(&self, relative: &str) {
        if let Err(e) = self.try_remove(relative).await {
            tracing::debug!(path = relative, error = %e, "ignored flyer removal failure");
        }
    }
}

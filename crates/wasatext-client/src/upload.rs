use std::path::Path;

use bytes::Bytes;
use reqwest::Body;
use reqwest::multipart::{Form, Part};

use crate::error::ApiResult;

/// A file to send as the single part of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, inferring the MIME type from its extension.
    pub async fn from_path(path: &Path) -> ApiResult<Self> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = mime_from_extension(path).to_string();

        Ok(Self::new(file_name, mime_type, data))
    }

    /// Wrap the file in a form under `field`.
    pub fn into_form(self, field: &'static str) -> ApiResult<Form> {
        let len = self.data.len() as u64;
        let part = Part::stream_with_length(Body::from(self.data), len)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?;
        Ok(Form::new().part(field, part))
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_inferred_case_insensitively() {
        assert_eq!(mime_from_extension(Path::new("a/cat.JPG")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("cat.webp")), "image/webp");
        assert_eq!(mime_from_extension(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn invalid_mime_is_rejected() {
        let file = UploadFile::new("x.png", "not a mime", vec![1u8, 2, 3]);
        assert!(file.into_form("photo").is_err());
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("wasatext_upload_{}.png", std::process::id()));
        tokio::fs::write(&path, b"\x89PNG").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.data.as_ref(), b"\x89PNG");
        assert!(file.file_name.ends_with(".png"));

        let _ = tokio::fs::remove_file(&path).await;
    }
}

//! File upload endpoint

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::error::{ClientError, ClientResult};

use super::ApiClient;

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    /// Upload an image; the backend answers with the stored path as plain text
    pub async fn upload_file(&self, path: &Path) -> ClientResult<String> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))?;
        let form = Form::new().part("file", part);

        let builder = self.request(Method::POST, "/files/upload").multipart(form);
        let response = self.send(Method::POST, "/files/upload", builder).await?;
        let stored = response.text().await?.trim().to_string();

        if stored.is_empty() {
            return Err(ClientError::Api {
                status: 200,
                message: "upload succeeded but no file path was returned".to_string(),
            });
        }
        Ok(stored)
    }
}

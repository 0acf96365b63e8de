//! Multipart bodies for the upload endpoints.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::http::error::ClientError;
use crate::model::Metadata;

/// A file held in memory, ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// Lowercased extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn into_part(self) -> Result<Part, ClientError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| ClientError::Validation(format!("invalid content type: {}", e)))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Single-file body: a `file` part followed by the flattened metadata.
pub fn single_file_form(file: UploadFile, metadata: &Metadata) -> Result<Form, ClientError> {
    let form = Form::new().part("file", file.into_part()?);
    Ok(append_metadata(form, metadata))
}

/// Batch body: `files[0]`, `files[1]`, ... followed by the flattened metadata.
pub fn multi_file_form(files: Vec<UploadFile>, metadata: &Metadata) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for (index, file) in files.into_iter().enumerate() {
        form = form.part(format!("files[{}]", index), file.into_part()?);
    }
    Ok(append_metadata(form, metadata))
}

fn append_metadata(form: Form, metadata: &Metadata) -> Form {
    metadata
        .iter()
        .fold(form, |form, (key, value)| form.text(key.clone(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(UploadFile::new("notes.TXT", vec![]).content_type, "text/plain");
        assert_eq!(UploadFile::new("report.pdf", vec![]).content_type, "application/pdf");
        assert_eq!(
            UploadFile::new("archive", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn extension_is_lowercased() {
        let file = UploadFile::new("Report.Markdown", b"# hi".to_vec());
        assert_eq!(file.extension().as_deref(), Some("markdown"));
        assert_eq!(file.size(), 4);
        assert_eq!(UploadFile::new("README", vec![]).extension(), None);
    }
}

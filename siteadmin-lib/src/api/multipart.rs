//! Multipart form payloads

use std::path::Path;
use std::path::PathBuf;

use reqwest::multipart::Form;
use reqwest::multipart::Part;

use crate::error::ApiError;
use crate::error::Error;
use crate::model::Record;
use crate::model::Value;

/// Where a file part's bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// Read from disk when the request is sent.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Vec<u8>),
}

/// A file attached to a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub mime_type: String,
    pub source: FileSource,
}

/// The body of a single multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    Text(String),
    File(FilePart),
}

/// An ordered list of named multipart parts.
///
/// Repeating a name is allowed and produces several parts with that name,
/// which is how multi-image uploads are sent.
///
/// # Example
///
/// ```
/// use siteadmin_lib::api::MultipartForm;
///
/// let form = MultipartForm::new()
///     .text("altText", "Company logo")
///     .file_bytes("image", "logo.png", vec![0x89, 0x50]);
///
/// assert_eq!(form.text_value("altText"), Some("Company logo"));
/// assert_eq!(form.files("image")[0].mime_type, "image/png");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<(String, PartBody)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a form of text parts from a record's fields.
    ///
    /// Null fields are skipped; lists and nested objects are sent as JSON
    /// text.
    pub fn from_record(record: &Record) -> Self {
        let mut form = Self::new();
        for name in record.field_names() {
            if let Some(value) = record.get(name) {
                form.push_value(name, value);
            }
        }
        form
    }

    /// Appends a text part.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    /// Appends a JSON-encoded text part.
    pub fn json(mut self, name: impl Into<String>, value: &serde_json::Value) -> Self {
        self.push_text(name, value.to_string());
        self
    }

    /// Appends a file read from disk.
    pub fn file_path(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.push_file_path(name, path);
        self
    }

    /// Appends an in-memory file.
    pub fn file_bytes(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        let file_name = file_name.into();
        self.parts.push((
            name.into(),
            PartBody::File(FilePart {
                mime_type: mime_for(Path::new(&file_name)).to_string(),
                file_name,
                source: FileSource::Bytes(bytes),
            }),
        ));
        self
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push((name.into(), PartBody::Text(value.into())));
    }

    /// Appends a record value using the same encoding as [`from_record`](Self::from_record).
    pub fn push_value(&mut self, name: &str, value: &Value) {
        match value {
            Value::Null => {}
            Value::List(_) | Value::Json(_) => self.push_text(name, value.to_json().to_string()),
            other => self.push_text(name, other.to_string()),
        }
    }

    pub fn push_file_path(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        self.parts.push((
            name.into(),
            PartBody::File(FilePart {
                file_name,
                mime_type: mime_for(&path).to_string(),
                source: FileSource::Path(path),
            }),
        ));
    }

    /// Returns all parts in insertion order.
    pub fn parts(&self) -> &[(String, PartBody)] {
        &self.parts
    }

    /// Returns the first text part with the given name.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, body)| match body {
            PartBody::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns every file part with the given name.
    pub fn files(&self, name: &str) -> Vec<&FilePart> {
        self.parts
            .iter()
            .filter_map(|(n, body)| match body {
                PartBody::File(file) if n == name => Some(file),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Reads every path-backed file into memory.
    ///
    /// Done once before sending so retries can rebuild the body without
    /// touching the filesystem again.
    pub async fn load(self) -> Result<Self, Error> {
        let mut parts = Vec::with_capacity(self.parts.len());
        for (name, body) in self.parts {
            let body = match body {
                PartBody::File(FilePart {
                    file_name,
                    mime_type,
                    source: FileSource::Path(path),
                }) => {
                    log::debug!("Reading {} for part '{}'", path.display(), name);
                    let bytes = tokio::fs::read(&path).await?;
                    PartBody::File(FilePart {
                        file_name,
                        mime_type,
                        source: FileSource::Bytes(bytes),
                    })
                }
                other => other,
            };
            parts.push((name, body));
        }
        Ok(Self { parts })
    }

    /// Converts a loaded form into a reqwest form.
    ///
    /// Path-backed parts that were not loaded are an error.
    pub(crate) fn to_form(&self) -> Result<Form, Error> {
        let mut form = Form::new();
        for (name, body) in &self.parts {
            form = match body {
                PartBody::Text(text) => form.text(name.clone(), text.clone()),
                PartBody::File(file) => {
                    let bytes = match &file.source {
                        FileSource::Bytes(bytes) => bytes.clone(),
                        FileSource::Path(path) => {
                            return Err(Error::InvalidOperation(format!(
                                "file '{}' was not loaded before sending",
                                path.display()
                            )));
                        }
                    };
                    let part = Part::bytes(bytes)
                        .file_name(file.file_name.clone())
                        .mime_str(&file.mime_type)
                        .map_err(ApiError::from)?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

/// Guesses a MIME type from a file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("a/b/photo.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("cv.pdf")), "application/pdf");
        assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_from_record_encodes_lists_as_json() {
        let record = Record::new()
            .set("projectName", "Tower")
            .set("areas", vec![Value::Float(1.5), Value::Int(2)])
            .set("locations", vec!["Pune", "Goa"])
            .set("note", Value::Null);
        let form = MultipartForm::from_record(&record);

        assert_eq!(form.text_value("projectName"), Some("Tower"));
        assert_eq!(form.text_value("areas"), Some("[1.5,2]"));
        assert_eq!(form.text_value("locations"), Some("[\"Pune\",\"Goa\"]"));
        assert_eq!(form.text_value("note"), None);
    }

    #[test]
    fn test_repeated_file_names() {
        let form = MultipartForm::new()
            .file_path("images", "/tmp/a.png")
            .file_path("images", "/tmp/b.webp");
        let files = form.files("images");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name, "a.png");
        assert_eq!(files[1].mime_type, "image/webp");
    }

    #[tokio::test]
    async fn test_load_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let form = MultipartForm::new().file_path("resume", &path).load().await.unwrap();
        assert_eq!(form.files("resume")[0].source, FileSource::Bytes(b"%PDF".to_vec()));
        assert!(form.to_form().is_ok());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let result = MultipartForm::new()
            .file_path("image", "/definitely/not/here.png")
            .load()
            .await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_unloaded_path_cannot_be_sent() {
        let form = MultipartForm::new().file_path("image", "/tmp/x.png");
        assert!(matches!(form.to_form(), Err(Error::InvalidOperation(_))));
    }
}

//! Document intake from the file picker.
//!
//! The picker only hands over metadata: name, MIME type, size, and
//! last-modified time. Content is never read. Intake checks the type against
//! the accepted list and mints the [`Document`] the store will hold.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use rand::Rng;
use time::OffsetDateTime;

use crate::types::Document;

/// Accepted MIME types and the extensions that imply them.
pub const ACCEPTED_TYPES: [(&str, &str); 4] = [
    ("application/pdf", ".pdf"),
    ("application/msword", ".doc"),
    ("application/vnd.openxmlformats-officedocument.wordprocessingml.document", ".docx"),
    ("text/plain", ".txt"),
];

const ID_LEN: usize = 7;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("unsupported file type for {name}: {mime_type:?}")]
    UnsupportedType { name: String, mime_type: String },
}

/// Metadata of a file chosen by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    /// MIME type as reported by the picker; may be empty.
    pub mime_type: String,
    pub size: u64,
    pub last_modified: OffsetDateTime,
}

/// Resolve the effective MIME type of `file`, or `None` if it is not accepted.
///
/// A reported type must be on the list. When the picker reports nothing (or
/// the generic `application/octet-stream`), the extension decides.
#[must_use]
pub fn accepted_type(file: &PickedFile) -> Option<&'static str> {
    let reported = file.mime_type.trim().to_ascii_lowercase();
    if reported.is_empty() || reported == "application/octet-stream" {
        let name = file.name.to_ascii_lowercase();
        return ACCEPTED_TYPES
            .iter()
            .find(|(_, ext)| name.ends_with(ext))
            .map(|(mime, _)| *mime);
    }
    ACCEPTED_TYPES.iter().find(|(mime, _)| *mime == reported).map(|(mime, _)| *mime)
}

/// Turn a picked file into a document owned by `user_id`.
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedType`] if the file type is not accepted.
pub fn intake(file: PickedFile, user_id: &str) -> Result<Document, UploadError> {
    let Some(mime_type) = accepted_type(&file) else {
        return Err(UploadError::UnsupportedType { name: file.name, mime_type: file.mime_type });
    };
    Ok(Document {
        id: generate_document_id(),
        name: file.name,
        mime_type: mime_type.to_owned(),
        size: file.size,
        upload_date: OffsetDateTime::now_utc(),
        last_modified: file.last_modified,
        user_id: user_id.to_owned(),
        content: None,
        summary: None,
    })
}

/// Short random lowercase base-36 id.
#[must_use]
pub fn generate_document_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..ID_ALPHABET.len());
            ID_ALPHABET[idx] as char
        })
        .collect()
}

/// Icon family for a MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Doc,
    Text,
    Other,
}

impl FileKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Text => "text",
            Self::Other => "other",
        }
    }
}

#[must_use]
pub fn file_kind(mime_type: &str) -> FileKind {
    let mime = mime_type.to_ascii_lowercase();
    if mime.contains("pdf") {
        FileKind::Pdf
    } else if mime.contains("doc") || mime.contains("word") {
        FileKind::Doc
    } else if mime.contains("txt") || mime.contains("text") {
        FileKind::Text
    } else {
        FileKind::Other
    }
}

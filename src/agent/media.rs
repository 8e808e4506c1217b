use std::{fs, path::Path};

use base64::Engine as _;

use crate::{domain::AttachmentType, errors::AgentError};

/// Inline bytes sent alongside a prompt, already base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub mime_type: String,
    pub data: String,
}

impl Media {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(
            mime_type,
            base64::engine::general_purpose::STANDARD.encode(bytes),
        )
    }

    /// Reads a file, inferring its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, AgentError> {
        let bytes = fs::read(path)?;
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_for_extension)
            .unwrap_or("application/octet-stream");
        Ok(Self::from_bytes(mime, &bytes))
    }

    pub fn kind(&self) -> AttachmentType {
        if self.mime_type.starts_with("image") {
            AttachmentType::Image
        } else {
            AttachmentType::Audio
        }
    }

    pub fn is_audio(&self) -> bool {
        self.mime_type.contains("audio")
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "opus" => "audio/ogg",
        "webm" => "audio/webm",
        "m4a" | "mp4" => "audio/mp4",
        _ => return None,
    };
    Some(mime)
}

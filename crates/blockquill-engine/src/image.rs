use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Could not read image file: {0}")]
    Read(String),
    #[error("Not an image file: {0}")]
    UnsupportedType(String),
    #[error("Image file is empty: {0}")]
    Empty(String),
}

/// `data:<mime>;base64,<payload>` URL used as an image block's `src`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    /// Encode a picked file. The reported content type wins when it is an
    /// image type, otherwise the extension decides.
    pub fn for_file(
        name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty(name.to_string()));
        }
        let mime = content_type
            .filter(|ct| ct.starts_with("image/"))
            .or_else(|| mime_for_name(name))
            .ok_or_else(|| ImageError::UnsupportedType(name.to_string()))?;
        Ok(Self::from_bytes(mime, bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn mime_for_name(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Handle for one in-flight image read, issued when the gate let it start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageTicket(pub(crate) u64);

impl ImageTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

//! Image upload rules: MIME allow-list, size ceiling, content sniffing and
//! stored-file naming.
//!
//! The API layer calls these in order (declared type, size, content) and
//! only touches the filesystem once all three pass.

use image::ImageFormat;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum accepted upload size: 2 MiB.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Declared MIME types accepted by the upload endpoint.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Public URL prefix under which stored uploads are served.
pub const PUBLIC_URL_PREFIX: &str = "/uploads";

pub const MSG_NO_FILE: &str = "No file uploaded";
pub const MSG_TYPE_NOT_ALLOWED: &str =
    "File type not allowed. Only images (JPEG, PNG, GIF, WebP) are accepted.";
pub const MSG_TOO_LARGE: &str = "File too large. Maximum size is 2MB.";
pub const MSG_CONTENT_MISMATCH: &str = "File content does not match an allowed image type.";

// ---------------------------------------------------------------------------
// Image kinds
// ---------------------------------------------------------------------------

/// The four image families the site accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageKind {
    /// Map a declared MIME type onto an image family. Unknown types are `None`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::WebP => Some(Self::Webp),
            _ => None,
        }
    }

    /// Whether `ext` (lower-case) is a conventional extension for this kind.
    pub fn accepts_extension(self, ext: &str) -> bool {
        match self {
            Self::Jpeg => matches!(ext, "jpg" | "jpeg"),
            Self::Png => ext == "png",
            Self::Gif => ext == "gif",
            Self::Webp => ext == "webp",
        }
    }

    /// Canonical file extension, used when the client's name has none.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the declared MIME type, then the size. Returns the declared family.
pub fn validate_declared(content_type: Option<&str>, size: usize) -> Result<ImageKind, CoreError> {
    let kind = content_type
        .and_then(ImageKind::from_mime)
        .ok_or_else(|| CoreError::Validation(MSG_TYPE_NOT_ALLOWED.to_string()))?;

    if size > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(MSG_TOO_LARGE.to_string()));
    }

    Ok(kind)
}

/// Identify the image family from the leading magic bytes.
pub fn sniff(bytes: &[u8]) -> Option<ImageKind> {
    image::guess_format(bytes)
        .ok()
        .and_then(ImageKind::from_format)
}

/// Verify that the content really is the declared image family.
pub fn verify_content(declared: ImageKind, bytes: &[u8]) -> Result<ImageKind, CoreError> {
    match sniff(bytes) {
        Some(actual) if actual == declared => Ok(actual),
        _ => Err(CoreError::Validation(MSG_CONTENT_MISMATCH.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Build the stored file name: `{prefix}_{epoch_millis}.{ext}`.
///
/// The client's extension is kept (lower-cased) only when it names the
/// detected kind, so `x.jpeg` stays `.jpeg`; anything else, including a
/// missing extension or `x.html` carrying JPEG bytes, gets the canonical
/// extension and is served with an image content type.
pub fn stored_file_name(
    prefix: &str,
    original_name: Option<&str>,
    epoch_millis: i64,
    kind: ImageKind,
) -> String {
    let ext = original_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| kind.accepts_extension(ext))
        .unwrap_or_else(|| kind.extension().to_string());

    format!("{prefix}_{epoch_millis}.{ext}")
}

/// Relative URL a stored upload is served from.
pub fn public_url(file_name: &str) -> String {
    format!("{PUBLIC_URL_PREFIX}/{file_name}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Cover image upload rules.
//!
//! Uploads are checked twice: the declared content type must be one of the
//! allowed image types, and the leading bytes must sniff as the same kind of
//! image. Nothing is sent to the asset host unless both agree.

use image::ImageFormat;

use crate::error::CoreError;

/// Maximum accepted upload size (2 MiB).
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Declared content types accepted for upload.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

pub const NO_FILE: &str = "No file uploaded";
pub const TOO_LARGE: &str = "File too large. Max size is 2MB";
pub const UNSUPPORTED_TYPE: &str = "Only image files (jpeg, jpg, png, gif, webp) are allowed";

/// Image kinds the asset host accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageKind {
    /// Map a declared content type to an image kind.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        if !ALLOWED_MIME_TYPES
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
        {
            return None;
        }
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Identify the image kind from its magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match image::guess_format(data).ok()? {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::WebP => Some(Self::Webp),
            _ => None,
        }
    }

    /// File extension used when forwarding the upload.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Canonical content type.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

/// Validate an uploaded image and return its kind.
///
/// Checks, in order: non-empty, size limit, declared type, sniffed type.
pub fn validate_image_upload(
    content_type: Option<&str>,
    data: &[u8],
) -> Result<ImageKind, CoreError> {
    if data.is_empty() {
        return Err(CoreError::Validation(NO_FILE.into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(TOO_LARGE.into()));
    }

    let declared = content_type
        .and_then(ImageKind::from_mime)
        .ok_or_else(|| CoreError::Validation(UNSUPPORTED_TYPE.into()))?;

    match ImageKind::sniff(data) {
        Some(actual) if actual == declared => Ok(actual),
        _ => Err(CoreError::Validation(UNSUPPORTED_TYPE.into())),
    }
}

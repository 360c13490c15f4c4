//! Cover image link validation.
//!
//! A mixtape cover must point at an image this service uploaded itself:
//! the trusted asset host plus the configured upload folder. Anything else
//! is rejected rather than silently dropped, so clients learn to go through
//! the upload endpoint first.

use url::Url;

use crate::error::CoreError;

/// Default host serving uploaded assets.
pub const DEFAULT_TRUSTED_HOST: &str = "res.cloudinary.com";

/// Default folder uploads are written into.
pub const DEFAULT_UPLOAD_FOLDER: &str = "harmolinku_uploads";

/// Why a photo link was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetLinkRejection {
    #[error("untrusted or unvalidated photo reference")]
    Untrusted,
}

impl From<AssetLinkRejection> for CoreError {
    fn from(rejection: AssetLinkRejection) -> Self {
        CoreError::Validation(format!(
            "Invalid photo URL ({rejection}). \
             Please upload the image using the upload endpoint first."
        ))
    }
}

/// Vets client-supplied cover URLs against the trusted host and folder.
#[derive(Debug, Clone)]
pub struct AssetLinkValidator {
    trusted_host: String,
    upload_folder: String,
}

impl AssetLinkValidator {
    pub fn new(trusted_host: impl Into<String>, upload_folder: impl Into<String>) -> Self {
        Self {
            trusted_host: trusted_host.into().to_ascii_lowercase(),
            upload_folder: upload_folder.into(),
        }
    }

    /// Validate an optional photo URL.
    ///
    /// - `None`, empty or blank input means "no cover" and yields `Ok(None)`.
    /// - Accepted `https` links are returned exactly as given (minus
    ///   surrounding whitespace); accepted `http` links only get their scheme
    ///   rewritten to `https`.
    pub fn validate(&self, url: Option<&str>) -> Result<Option<String>, AssetLinkRejection> {
        let raw = match url.map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };

        let parsed = Url::parse(raw).map_err(|_| AssetLinkRejection::Untrusted)?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AssetLinkRejection::Untrusted);
        }

        let host_matches = parsed
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(&self.trusted_host));
        if !host_matches || !self.in_upload_folder(&parsed) {
            return Err(AssetLinkRejection::Untrusted);
        }

        if parsed.scheme() == "https" {
            return Ok(Some(raw.to_string()));
        }
        Ok(Some(upgrade_to_https(raw, parsed)))
    }

    fn in_upload_folder(&self, url: &Url) -> bool {
        url.path_segments()
            .is_some_and(|mut segments| segments.any(|segment| segment == self.upload_folder))
    }
}

/// Swap an `http` scheme for `https`, leaving the rest of `raw` untouched.
fn upgrade_to_https(raw: &str, mut parsed: Url) -> String {
    match raw.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("http:") => format!("https:{}", &raw[5..]),
        // Leading control characters the parser skipped; fall back to the
        // normalized form.
        _ => {
            let _ = parsed.set_scheme("https");
            parsed.into()
        }
    }
}

impl Default for AssetLinkValidator {
    fn default() -> Self {
        Self::new(DEFAULT_TRUSTED_HOST, DEFAULT_UPLOAD_FOLDER)
    }
}

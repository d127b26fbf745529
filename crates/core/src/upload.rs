//! Naming and validation helpers for uploaded screenshots.

use crate::error::CoreError;

/// Default upload size limit (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Public URL prefix under which uploaded images are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// MIME type assumed when the image format cannot be sniffed.
pub const FALLBACK_MIME_TYPE: &str = "image/png";

/// Build the stored filename for an upload.
///
/// Convention: `{timestamp_millis}_{original}` where `original` is the
/// client-supplied basename with anything outside `[A-Za-z0-9._-]` replaced
/// by `_`. Directory components are discarded.
///
/// # Examples
///
/// ```
/// use designsight_core::upload::stored_filename;
///
/// assert_eq!(stored_filename(1700000000000, "home.png"), "1700000000000_home.png");
/// assert_eq!(stored_filename(1, "../../etc/passwd"), "1_passwd");
/// assert_eq!(stored_filename(1, "my screen (1).png"), "1_my_screen__1_.png");
/// ```
pub fn stored_filename(timestamp_millis: i64, original: &str) -> String {
    let basename = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    let sanitized: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let name = if sanitized.is_empty() {
        "upload"
    } else {
        sanitized.as_str()
    };
    format!("{timestamp_millis}_{name}")
}

/// Public URL of a stored upload.
pub fn image_url(stored_filename: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}/{stored_filename}")
}

/// Reject empty uploads and uploads above `max_bytes`.
pub fn validate_upload_size(len: usize, max_bytes: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if len > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {len} bytes, maximum is {max_bytes}"
        )));
    }
    Ok(())
}

/// Sniff the MIME type of image bytes, falling back to [`FALLBACK_MIME_TYPE`].
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME_TYPE)
}

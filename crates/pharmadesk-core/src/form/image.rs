// Pharmacy photo attachment: read a file, cap it at 5 MiB, and encode it
// as a `data:` URL the backend stores verbatim.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::CoreError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME type for an image file, by extension.
fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    })
}

/// Encode raw bytes as `data:<mime>;base64,...`.
pub fn encode(bytes: &[u8], mime: &str) -> Result<String, CoreError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::invalid("image", "image is too large (max 5 MiB)"));
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Read an image file and encode it as a data URL.
pub fn encode_file(path: &Path) -> Result<String, CoreError> {
    let mime = mime_for(path).ok_or_else(|| {
        CoreError::invalid("image", format!("{} is not a supported image type", path.display()))
    })?;

    let unreadable =
        |e: std::io::Error| CoreError::invalid("image", format!("cannot read {}: {e}", path.display()));

    let size = std::fs::metadata(path).map_err(unreadable)?.len();
    if usize::try_from(size).map_or(true, |n| n > MAX_IMAGE_BYTES) {
        return Err(CoreError::invalid("image", "image is too large (max 5 MiB)"));
    }

    let bytes = std::fs::read(path).map_err(unreadable)?;
    encode(&bytes, mime)
}

/// Whether a stored value is a base64 data URL.
pub fn is_data_url(value: &str) -> bool {
    value
        .strip_prefix("data:")
        .is_some_and(|rest| rest.contains(";base64,"))
}

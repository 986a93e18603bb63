use crate::error::ApiError;

/// Largest accepted profile picture, in bytes.
pub const MAX_PICTURE_BYTES: usize = 1_000_000;

const ALLOWED_TYPES: [&str; 3] = ["jpeg", "jpg", "png"];

fn extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Gate on an uploaded picture: the file extension and the declared MIME
/// type must both name an allowed image type, and the body must fit the
/// size cap. Returns the normalized extension for the stored filename.
pub fn check_picture(filename: &str, content_type: &str, size: usize) -> Result<String, ApiError> {
    let ext = extension(filename)
        .filter(|e| ALLOWED_TYPES.contains(&e.as_str()))
        .ok_or_else(|| ApiError::Upload("Images only (jpeg, jpg, png)".into()))?;

    if !ALLOWED_TYPES.iter().any(|t| content_type.contains(t)) {
        return Err(ApiError::Upload("Images only (jpeg, jpg, png)".into()));
    }

    if size > MAX_PICTURE_BYTES {
        return Err(ApiError::Upload("File too large".into()));
    }

    Ok(ext)
}

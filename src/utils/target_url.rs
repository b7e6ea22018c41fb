//! Target URL validation.

use url::Url;

/// Errors that can occur while validating a link target.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Target URL must not be empty")]
    Blank,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),
}

/// Validates a link target and returns the value to store.
///
/// The input is trimmed and must parse as an absolute URL. The trimmed input is
/// returned as written, not re-serialized, so a link resolves to exactly what
/// its creator submitted.
///
/// # Errors
///
/// Returns [`TargetUrlError::Blank`] for empty or whitespace-only input.
/// Returns [`TargetUrlError::InvalidFormat`] if the input is not an absolute URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_target_url("  https://example.com ").unwrap(), "https://example.com");
/// assert!(validate_target_url("example.com").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<String, TargetUrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(TargetUrlError::Blank);
    }

    Url::parse(trimmed)?;

    Ok(trimmed.to_string())
}

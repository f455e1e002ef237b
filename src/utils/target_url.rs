//! Destination URL checks applied before a bulk generation request.

use url::Url;

/// Reasons a destination URL is refused.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Destination URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS destinations are allowed")]
    UnsupportedProtocol,

    #[error("Destination URL must include a host")]
    MissingHost,
}

/// Trims `input` and checks that it is an absolute HTTP(S) URL with a host.
///
/// The returned string is the trimmed input, not a re-serialized URL: the
/// backend stores the destination exactly as entered and links are later
/// grouped by exact string equality.
///
/// # Errors
///
/// Returns [`TargetUrlError::UnsupportedProtocol`] for `javascript:`,
/// `data:`, `file:` and every other non-HTTP scheme.
pub fn check_target_url(input: &str) -> Result<String, TargetUrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TargetUrlError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert_eq!(
            check_target_url("https://example.com/path?q=1").unwrap(),
            "https://example.com/path?q=1"
        );
        assert!(check_target_url("http://example.com").is_ok());
    }

    #[test]
    fn test_keeps_input_verbatim() {
        // No trailing slash is added and host case is preserved.
        assert_eq!(
            check_target_url("  https://Example.com  ").unwrap(),
            "https://Example.com"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(check_target_url("   "), Err(TargetUrlError::Empty));
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            check_target_url("/just/a/path"),
            Err(TargetUrlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in ["javascript:alert(1)", "data:text/html,hi", "file:///etc/passwd", "ftp://x.org"] {
            assert_eq!(
                check_target_url(input),
                Err(TargetUrlError::UnsupportedProtocol),
                "{input}"
            );
        }
    }
}

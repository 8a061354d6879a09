//! HTTP status lines as observed and persisted.

use std::fmt;

use reqwest::StatusCode;

/// The status line that counts as healthy.
pub const SUCCESS_LINE: &str = "200 OK";

/// An HTTP status line such as `"503 Service Unavailable"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusLine(String);

impl StatusLine {
    /// Wrap an already rendered line.
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    /// The healthy line.
    pub fn success() -> Self {
        Self(SUCCESS_LINE.to_string())
    }

    /// Render `<code> <canonical reason>`, or just `<code>` when the code
    /// has no registered reason phrase.
    pub fn from_status(status: StatusCode) -> Self {
        match status.canonical_reason() {
            Some(reason) => Self(format!("{} {}", status.as_u16(), reason)),
            None => Self(status.as_u16().to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.0 == SUCCESS_LINE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(StatusLine::from_status(StatusCode::OK).as_str(), "200 OK");
        assert_eq!(
            StatusLine::from_status(StatusCode::SERVICE_UNAVAILABLE).as_str(),
            "503 Service Unavailable"
        );
        assert_eq!(
            StatusLine::from_status(StatusCode::NOT_FOUND).as_str(),
            "404 Not Found"
        );
    }

    #[test]
    fn test_unregistered_code() {
        let code = StatusCode::from_u16(599).unwrap();
        assert_eq!(StatusLine::from_status(code).as_str(), "599");
    }

    #[test]
    fn test_only_200_is_success() {
        assert!(StatusLine::from_status(StatusCode::OK).is_success());
        assert!(!StatusLine::from_status(StatusCode::NO_CONTENT).is_success());
        assert!(!StatusLine::new("200 Okay").is_success());
    }
}

//! Error reporting
//!
//! Every failure surfaces as a [`SortError`]. Input errors carry the source
//! text and a span so miette can point at the offending token.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Input text for error reporting
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.to_string())
    }
}

/// Sorting, planning, configuration and I/O errors
#[derive(Error, Debug, Diagnostic)]
pub enum SortError {
    #[error("Unsupported length {len}: the bitonic network needs a power of two (next is {next})")]
    #[diagnostic(
        code(sort::unsupported_length),
        help("use the padded network (`sort_padded`, `--pad`, `policy = \"pad\"`) for other lengths")
    )]
    UnsupportedLength { len: usize, next: usize },

    #[error("Invalid element `{token}`: expected a signed integer")]
    #[diagnostic(code(input::invalid_element))]
    InvalidElement {
        token: String,
        #[label("not a signed integer")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Invalid launch configuration: {0}")]
    #[diagnostic(code(launch::invalid_config))]
    InvalidLaunch(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(config::invalid))]
    Config(String),

    #[error("Failed to build thread pool: {0}")]
    #[diagnostic(code(exec::thread_pool))]
    ThreadPool(String),

    #[error("`{}` is not valid UTF-8 text", .path.display())]
    #[diagnostic(
        code(io::encoding),
        help("input must be UTF-8 encoded integers separated by whitespace or commas")
    )]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to access `{}`", .path.display())]
    #[diagnostic(code(io::failed))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SortError {
    pub fn unsupported_length(len: usize) -> Self {
        SortError::UnsupportedLength {
            len,
            next: len.checked_next_power_of_two().unwrap_or(usize::MAX),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::InvalidData => SortError::Encoding { path, source },
            _ => SortError::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_length_message() {
        let err = SortError::unsupported_length(6);
        assert_eq!(
            err.to_string(),
            "Unsupported length 6: the bitonic network needs a power of two (next is 8)"
        );
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("sort::unsupported_length")
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = SortError::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "Failed to access `missing.txt`");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_data_is_encoding_error() {
        let err = SortError::io(
            "latin1.txt",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid UTF-8"),
        );
        assert!(matches!(err, SortError::Encoding { .. }));
        assert_eq!(err.to_string(), "`latin1.txt` is not valid UTF-8 text");
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("io::encoding"));
        assert!(err.help().is_some());
    }
}

//! Errors raised while reading stylesheets and CSS values.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading stylesheets and CSS values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A stylesheet could not be tokenized or a rule had no valid block.
    #[error("CSS parse error at {line}:{column}: {message}")]
    Parse {
        message: String,
        /// One-based line.
        line: u32,
        /// Column within the line.
        column: u32,
    },

    /// A selector used a form the matcher does not understand.
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A stylesheet file could not be read.
    #[error("failed to read stylesheet '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `<time>` value was not a non-negative number with an `ms` or `s` unit.
    #[error("invalid time value '{value}': {message}")]
    InvalidTime { value: String, message: String },
}

impl Error {
    pub(crate) fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    pub(crate) fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_time(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTime {
            value: value.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_keeps_its_source() {
        let error = Error::io(
            "theme/blocks.css",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(error.to_string(), "failed to read stylesheet 'theme/blocks.css'");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn time_error_names_the_value() {
        let error = Error::invalid_time("300x", "time did not end with 'ms' or 's'");
        assert!(error.to_string().starts_with("invalid time value '300x'"));
    }
}

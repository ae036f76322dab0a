//! Error types for the Refrain system.
//!
//! Uses `thiserror` for ergonomic error definition. Pattern-text errors
//! carry the byte position of the offending character so the runtime can
//! point at it.

use thiserror::Error;

/// The main error type for Refrain operations.
#[derive(Debug)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// The pattern source text this error refers to, when known.
    pub pattern: Option<String>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(pattern) = &self.pattern {
            write!(f, " in pattern {pattern:?}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            pattern: None,
        }
    }

    /// Attaches the pattern source text to this error.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Creates a lexical error at a byte position in the pattern text.
    #[must_use]
    pub fn lex(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Lex {
            message: message.into(),
            position,
        })
    }

    /// Creates a structural parse error at a byte position.
    #[must_use]
    pub fn parse(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            position,
        })
    }

    /// Creates a malformed-input error for a sequence line.
    #[must_use]
    pub fn input(message: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::Input {
            message: message.into(),
            line,
        })
    }

    /// Creates an empty-domain error for a variable.
    #[must_use]
    pub fn empty_domain(variable: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyDomain(variable.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Unknown character in pattern text.
    #[error("lex error at position {position}: {message}")]
    Lex {
        /// Description of the lexical error.
        message: String,
        /// Byte offset in the pattern text.
        position: usize,
    },

    /// Structural error in pattern text.
    #[error("parse error at position {position}: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Byte offset in the pattern text.
        position: usize,
    },

    /// Malformed sequence input.
    #[error("input error on line {line}: {message}")]
    Input {
        /// Description of the input error.
        message: String,
        /// 0-based sequence index in the input.
        line: usize,
    },

    /// A variable's domain resolved to the empty set.
    #[error("variable {0} has an empty domain")]
    EmptyDomain(String),

    /// Failure reading or writing a file or stream.
    #[error("i/o error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

use std::fmt;
use std::path::PathBuf;

/// All errors produced while loading, validating, or compiling a storybook.
#[derive(Debug)]
pub struct StoryError {
    pub kind: ErrorKind,
    /// 1-based `(line, column)` inside the storybook JSON, when known.
    pub location: Option<(usize, usize)>,
    pub path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The storybook file could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The storybook is not well-formed JSON or does not match the schema.
    #[error("malformed storybook: {0}")]
    Json(String),
    /// The storybook parsed but breaks a structural rule.
    #[error("invalid storybook: {0}")]
    Invalid(String),
    /// A warning promoted to an error by strict mode.
    #[error("warning treated as error: {0}")]
    Strict(String),
}

impl fmt::Display for StoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: ", path.display())?;
        }
        write!(f, "{}", self.kind)?;
        if let Some((line, column)) = self.location {
            write!(f, " (at line {line}, column {column})")?;
        }
        Ok(())
    }
}

impl std::error::Error for StoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;

impl From<ErrorKind> for StoryError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
            path: None,
        }
    }
}

impl From<std::io::Error> for StoryError {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e).into()
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(e: serde_json::Error) -> Self {
        let location = (e.line() > 0).then(|| (e.line(), e.column()));
        Self {
            kind: ErrorKind::Json(e.to_string()),
            location,
            path: None,
        }
    }
}

/// Shorthand constructors.
impl StoryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ErrorKind::Invalid(msg.into()).into()
    }

    pub fn strict(warning: impl Into<String>) -> Self {
        ErrorKind::Strict(warning.into()).into()
    }

    /// Attach the file the error came from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

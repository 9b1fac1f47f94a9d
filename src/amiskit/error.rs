use envelope::EnvelopeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AmisError {
    /// A declared attribute was given a value outside its permitted shapes.
    #[error("invalid value for `{field}`: expected {expected}, received {received}")]
    Validation {
        field: String,
        expected: String,
        received: &'static str,
    },

    /// A value in the tree has no JSON representation.
    #[error("cannot serialize `{path}`: {message}")]
    Serialization { path: String, message: String },

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl AmisError {
    pub fn validation(field: &str, expected: String, received: &'static str) -> Self {
        AmisError::Validation {
            field: field.to_string(),
            expected,
            received,
        }
    }

    pub fn serialization(path: &str, message: impl Into<String>) -> Self {
        AmisError::Serialization {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Prefixes the path of a serialization error with the enclosing field.
    ///
    /// Index segments (`[2]`) attach without a dot. Other errors pass through.
    pub(crate) fn at(self, segment: &str) -> Self {
        match self {
            AmisError::Serialization { path, message } => {
                let path = if path.is_empty() {
                    segment.to_string()
                } else if path.starts_with('[') {
                    format!("{segment}{path}")
                } else {
                    format!("{segment}.{path}")
                };
                AmisError::Serialization { path, message }
            }
            other => other,
        }
    }
}

impl From<EnvelopeError> for AmisError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::TemplateNotFound(name) => AmisError::TemplateNotFound(name),
            EnvelopeError::Template(inner) => AmisError::Template(inner.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AmisError>;

use thiserror::Error;

/// Errors that can occur while loading or saving persisted workflow data,
/// key-info data or layout configuration.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to parse {what} JSON: {source}")]
    JsonParse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {what} to JSON: {source}")]
    JsonWrite {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not access file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A structural step mutation rejected by the first/last core step rule.
///
/// Carries the same localized message the validators report, so callers can
/// surface it to the user unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepOrderError {
    #[error("Reorder from {from} to {to} rejected: {message}")]
    ReorderRejected {
        from: usize,
        to: usize,
        message: String,
    },

    #[error("Deletion at {index} rejected: {message}")]
    DeletionRejected { index: usize, message: String },

    #[error("Step index {index} is out of range for {len} steps")]
    IndexOutOfRange { index: usize, len: usize },
}

impl StepOrderError {
    /// The user-facing message, without the positional prefix.
    pub fn message(&self) -> String {
        match self {
            StepOrderError::ReorderRejected { message, .. }
            | StepOrderError::DeletionRejected { message, .. } => message.clone(),
            StepOrderError::IndexOutOfRange { .. } => self.to_string(),
        }
    }
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(what: &'static str, json: &str) -> Result<T, LoadError> {
    serde_json::from_str(json).map_err(|source| LoadError::JsonParse { what, source })
}

pub(crate) fn write_json<T: serde::Serialize>(what: &'static str, value: &T) -> Result<String, LoadError> {
    serde_json::to_string_pretty(value).map_err(|source| LoadError::JsonWrite { what, source })
}

pub(crate) fn read_json_file<T: serde::de::DeserializeOwned>(
    what: &'static str,
    path: &std::path::Path,
) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_json(what, &content)
}

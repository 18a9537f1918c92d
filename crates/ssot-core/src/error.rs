use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SsotError {
    #[error("docs directory not found: {}", .0.display())]
    DocsDirNotFound(PathBuf),

    #[error("site source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("invalid site target '{0}': must be a relative path without '..'")]
    InvalidTarget(String),

    #[error("invalid field name '{0}': must start with a letter or underscore and contain only letters, digits, '_' or '-'")]
    InvalidFieldName(String),

    #[error("required field set is empty")]
    EmptyFieldSet,

    #[error("unknown field set '{0}': expected 'default' or 'template'")]
    UnknownFieldSet(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SsotError>;

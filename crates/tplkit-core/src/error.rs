use std::path::PathBuf;
use thiserror::Error;

use crate::lock::LockError;

#[derive(Error, Debug)]
pub enum TplkitError {
    // Template errors
    #[error("TEMPLATE_NOT_FOUND: Template \"{0}\" does not exist")]
    TemplateNotFound(String),

    #[error("TEMPLATE_TOO_LARGE: Template \"{name}\" is too big, max file size is {max_bytes} bytes")]
    TemplateTooLarge { name: String, max_bytes: u64 },

    #[error("TEMPLATE_TOO_MANY_INCLUDES: Can not include more than {limit} templates in a single template (found {found})")]
    TooManyIncludes { limit: usize, found: usize },

    #[error("TEMPLATE_INVALID_PARAMETER: invalid template parameter \"{name}\": {reason}")]
    InvalidParameterName { name: String, reason: String },

    #[error("TEMPLATE_INVALID_INPUT: {0}")]
    InvalidInput(String),

    #[error("TEMPLATE_ALREADY_RENDERED: parameters can not be set after rendering the template")]
    AlreadyRendered,

    // Cache errors
    #[error("CACHE_DIR_UNAVAILABLE: unable to create cache directory {0}, check write permissions")]
    CacheDirUnavailable(PathBuf),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Storage errors
    #[error("STORE_ERROR: failed to {op} {path}: {source}")]
    Store {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("LOCK_ERROR: {0}")]
    Lock(#[from] LockError),

    // Output errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // JSON errors
    #[error("JSON_ERROR: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TplkitError>;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating the configuration and loading scene inputs.
///
/// Every failure is terminal for the load; nothing is retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Missing: {field} path is empty")]
    MissingPath { field: &'static str },

    #[error("Not an {expected} file: {}", path.display())]
    InvalidExtension {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Malformed document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Unsupported light type '{value}' in {}", path.display())]
    UnknownLightType { path: PathBuf, value: String },

    #[error("Invalid shard parameters (split_num={split_num}, split_idx={split_idx}, len={len}): {reason}")]
    InvalidShardParams {
        split_num: usize,
        split_idx: usize,
        len: usize,
        reason: &'static str,
    },

    #[error("Invalid value '{value}' for attribute '{attribute}' of <{element}> in {}", path.display())]
    InvalidAttribute {
        path: PathBuf,
        element: String,
        attribute: String,
        value: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid XML in {}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("failed to import scene {}", path.display())]
    Scene {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

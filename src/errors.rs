use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in input document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scaler mean/scale length mismatch: {mean} means vs {scale} scales")]
    ScalerLengthMismatch { mean: usize, scale: usize },

    #[error("Tree node is neither a leaf nor a split. Node keys: {keys:?}")]
    UnexpectedNodeShape { keys: Vec<String> },

    #[error("Tree node does not have exactly 2 children. Found {found}.")]
    ChildArity { found: usize },

    #[error("Invalid split feature reference {token:?}, expected \"f<index>\"")]
    InvalidFeatureRef { token: String },

    #[error("Expected a {expected} for {field:?} in tree node")]
    InvalidNodeValue {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Tree {tree} splits on feature {feature} but the scaler defines only {n_features} features")]
    FeatureOutOfBounds {
        tree: usize,
        feature: usize,
        n_features: usize,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;

//! xgb2c: translate an exported XGBoost model plus feature-scaler parameters
//! into standalone C++ inference code.
//!
//! The generated pair of files contains the scaling constants, an in-place
//! normalization function, one evaluation function per boosted tree and a
//! `predict` function returning the logistic-squashed probability. The
//! emitted code has no dependency on the original modeling runtime.

pub mod cli;
pub mod codegen;
pub mod errors;
pub mod generate;
pub mod model;
pub mod util;

pub use errors::{ConvertError, ConvertResult};
pub use generate::{generate, GeneratedPaths, MODEL_FILE, SCALER_FILE};
pub use model::{Ensemble, ScalerSpec, TreeNode};

//! Orchestration: load the two input documents, validate, and emit the
//! header/source pair.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::codegen::{scaler, trees};
use crate::errors::{ConvertError, ConvertResult};
use crate::model::{Ensemble, ScalerSpec};

/// Expected filenames inside the input directory.
pub const SCALER_FILE: &str = "scaler_params.json";
pub const MODEL_FILE: &str = "xgb_model.json";

/// Paths of the emitted artifacts, for the caller's confirmation output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPaths {
    pub header: PathBuf,
    pub source: PathBuf,
}

/// Run one generation: `<input_dir>/{scaler_params,xgb_model}.json` in,
/// `<output_dir>/<basename>.{h,cc}` out.
///
/// All validation (missing inputs, structural tree errors, scaler length
/// mismatch, feature bounds) happens before the output directory is
/// created, so a failed run leaves the output location untouched.
#[instrument]
pub fn generate(
    input_dir: &Path,
    output_dir: &Path,
    basename: &str,
) -> ConvertResult<GeneratedPaths> {
    let scaler_path = input_dir.join(SCALER_FILE);
    let model_path = input_dir.join(MODEL_FILE);
    if !scaler_path.exists() {
        return Err(ConvertError::MissingInput(scaler_path));
    }
    if !model_path.exists() {
        return Err(ConvertError::MissingInput(model_path));
    }

    let spec = ScalerSpec::load(&scaler_path)?;
    let ensemble = Ensemble::load(&model_path)?;
    ensemble.validate_features(spec.n_features())?;
    debug!(
        "generating code for {} trees over {} features",
        ensemble.len(),
        spec.n_features()
    );

    fs::create_dir_all(output_dir)?;
    let paths = GeneratedPaths {
        header: output_dir.join(format!("{basename}.h")),
        source: output_dir.join(format!("{basename}.cc")),
    };

    let mut header = BufWriter::new(File::create(&paths.header)?);
    let mut source = BufWriter::new(File::create(&paths.source)?);

    scaler::write_header(&mut header, spec.n_features())?;
    scaler::write_definitions(&mut source, &spec, basename)?;
    trees::write_definitions(&mut source, &ensemble)?;

    header.flush()?;
    source.flush()?;
    Ok(paths)
}

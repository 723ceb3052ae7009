//! Scaler Emitter: feature-count constant, array declarations and the
//! in-place normalization function.

use std::io::{self, Write};

use itertools::Itertools;

use crate::codegen::{format_float, PREDICT_SIGNATURE, SCALE_INPUT_SIGNATURE};
use crate::model::ScalerSpec;

/// Write the declaration unit: the feature-count constant, extern array
/// declarations and the two public function signatures.
pub fn write_header<W: Write>(header: &mut W, n_features: usize) -> io::Result<()> {
    writeln!(header, "#pragma once")?;
    writeln!(header)?;
    writeln!(header, "const int N_FEATURES = {n_features};")?;
    writeln!(header, "extern const double mean[N_FEATURES];")?;
    writeln!(header, "extern const double scale[N_FEATURES];")?;
    writeln!(header, "{SCALE_INPUT_SIGNATURE};")?;
    writeln!(header, "{PREDICT_SIGNATURE};")?;
    Ok(())
}

/// Write the definition-unit preamble plus the scaling constants and the
/// `scale_input` body: `x[i] = (x[i] - mean[i]) / scale[i]` for every
/// feature index.
pub fn write_definitions<W: Write>(
    source: &mut W,
    spec: &ScalerSpec,
    basename: &str,
) -> io::Result<()> {
    writeln!(source, "#include \"{basename}.h\"")?;
    writeln!(source, "#include <cmath>")?;
    writeln!(source)?;
    writeln!(source, "const double mean[N_FEATURES] = {{{}}};", literals(&spec.mean))?;
    writeln!(source, "const double scale[N_FEATURES] = {{{}}};", literals(&spec.scale))?;
    writeln!(source)?;
    writeln!(source, "{SCALE_INPUT_SIGNATURE} {{")?;
    writeln!(source, "    for (int i = 0; i < N_FEATURES; ++i)")?;
    writeln!(source, "        x[i] = (x[i] - mean[i]) / scale[i];")?;
    writeln!(source, "}}")?;
    writeln!(source)?;
    Ok(())
}

fn literals(values: &[f64]) -> String {
    values.iter().map(|v| format_float(*v)).join(", ")
}

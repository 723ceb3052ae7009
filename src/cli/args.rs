//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Generate standalone C++ inference code from an exported XGBoost model
#[derive(Parser, Debug)]
#[command(name = "xgb2c")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing scaler_params.json and xgb_model.json
    #[arg(default_value = "exported_model", value_hint = ValueHint::DirPath)]
    pub input_dir: PathBuf,

    /// Directory the generated header/source pair is written to
    #[arg(default_value = "generated_code", value_hint = ValueHint::DirPath)]
    pub output_dir: PathBuf,

    /// Basename for the emitted <basename>.h and <basename>.cc
    #[arg(default_value = "model")]
    pub basename: String,

    /// Enable debug logging. Use multiple -d options to increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,
}

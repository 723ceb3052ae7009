use anyhow::Result;
use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::generate::generate;

#[instrument]
pub fn execute_command(cli: &Cli) -> Result<()> {
    debug!(
        "input_dir: {:?}, output_dir: {:?}, basename: {:?}",
        cli.input_dir, cli.output_dir, cli.basename
    );
    let paths = generate(&cli.input_dir, &cli.output_dir, &cli.basename)?;
    println!(
        "C++ files successfully written to: {} and {}",
        paths.header.display(),
        paths.source.display()
    );
    Ok(())
}

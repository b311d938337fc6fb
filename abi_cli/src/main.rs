//! extract-abis - merge facet ABIs into one artifact per logical contract
//!
//! With no arguments, reads `abi-manifest.yaml` from the working directory
//! and writes every listed contract's ABI.

use abi_extract::{run, AbiWriter, ForgeInspector, Manifest, DEFAULT_MANIFEST};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "extract-abis")]
#[command(about = "Extract contract ABIs and merge facet ABIs into one file per contract")]
#[command(version)]
struct Args {
    /// Manifest listing the contracts to extract
    #[arg(short = 'm', long = "manifest", value_name = "FILE", default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Output directory, overriding the manifest's `output-dir`
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let manifest = Manifest::load(&args.manifest)?;

    let mut inspector = ForgeInspector::new(&manifest.inspector);
    if let Some(project_dir) = &manifest.project_dir {
        inspector = inspector.in_dir(project_dir);
    }

    let out_dir = args.out_dir.unwrap_or_else(|| manifest.output_dir.clone());
    let writer = AbiWriter::new(out_dir);

    let written = run(&manifest, &inspector, &writer)?;
    info!(artifacts = written.len(), "done");

    Ok(())
}

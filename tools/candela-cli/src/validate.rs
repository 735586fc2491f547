//! Validate command - check a configuration against the packed field widths

use std::path::PathBuf;

use anyhow::{Context, Result};
use candela_volume::validate;
use clap::Args;

use crate::config::load_descriptor;

/// Arguments for the validate command
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the volume configuration JSON file
    pub config: PathBuf,
}

/// Execute the validate command
pub fn execute(args: ValidateArgs) -> Result<()> {
    let descriptor = load_descriptor(&args.config)?;

    validate(&descriptor)
        .with_context(|| format!("Invalid volume config: {}", args.config.display()))?;

    println!("OK: {} packs without aliasing", args.config.display());
    Ok(())
}

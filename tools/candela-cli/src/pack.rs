//! Pack command - encode a volume configuration into its GPU record

use std::path::PathBuf;

use anyhow::{Context, Result};
use candela_volume::validate;
use clap::Args;

use crate::config::load_descriptor;

/// Arguments for the pack command
#[derive(Args)]
pub struct PackArgs {
    /// Path to the volume configuration JSON file
    pub config: PathBuf,

    /// Output path for the 128-byte record (hex dump to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the pack command
pub fn execute(args: PackArgs) -> Result<()> {
    let descriptor = load_descriptor(&args.config)?;

    // Refuse to emit bytes that silently aliased
    validate(&descriptor)
        .with_context(|| format!("Invalid volume config: {}", args.config.display()))?;

    let packed = descriptor.pack();
    let bytes = packed.to_bytes();

    match args.output {
        Some(path) => {
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write record: {}", path.display()))?;
            println!("Packed {} -> {} (128 bytes)", args.config.display(), path.display());
        }
        None => {
            println!("Packed {} (128 bytes):", args.config.display());
            print_hex(&bytes);
        }
    }

    Ok(())
}

/// Print bytes as 16-byte rows with offsets, matching the record's row layout
fn print_hex(bytes: &[u8]) {
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        println!("{:#06x}: {}", row * 16, hex.join(" "));
    }
}

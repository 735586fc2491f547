//! Unpack command - decode a captured GPU record back into a configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use candela_volume::PackedVolumeDescriptor;
use clap::Args;

/// Arguments for the unpack command
#[derive(Args)]
pub struct UnpackArgs {
    /// Path to a file holding one 128-byte packed record
    pub record: PathBuf,
}

/// Execute the unpack command
pub fn execute(args: UnpackArgs) -> Result<()> {
    let bytes = std::fs::read(&args.record)
        .with_context(|| format!("Failed to read record file: {}", args.record.display()))?;

    let packed = PackedVolumeDescriptor::from_bytes(&bytes).ok_or_else(|| {
        anyhow::anyhow!(
            "Record too short: {} bytes (need {})",
            bytes.len(),
            PackedVolumeDescriptor::SIZE
        )
    })?;

    if bytes.len() > PackedVolumeDescriptor::SIZE {
        println!(
            "Note: {} holds {} bytes, decoding the first {}",
            args.record.display(),
            bytes.len(),
            PackedVolumeDescriptor::SIZE
        );
    }

    let descriptor = packed.unpack();
    let json = serde_json::to_string_pretty(&descriptor)
        .context("Failed to serialize decoded descriptor")?;
    println!("{json}");

    Ok(())
}

//! Candela CLI - authoring and inspection tool for probe-volume records
//!
//! # Commands
//!
//! - `candela validate` - Check a volume configuration against the packed field widths
//! - `candela pack` - Encode a configuration into its 128-byte GPU record
//! - `candela unpack` - Decode a 128-byte record back into a configuration
//!
//! # Usage
//!
//! ```bash
//! # Reject configs that would alias on encode
//! candela validate volume.json
//!
//! # Write the GPU record next to the config
//! candela pack volume.json -o volume.bin
//!
//! # Hex-dump the record instead of writing a file
//! candela pack volume.json
//!
//! # Recover a readable config from captured bytes
//! candela unpack volume.bin
//! ```
//!
//! Configurations are JSON in the shape serde derives from
//! `candela_volume::VolumeDescriptor`.

mod config;
mod pack;
mod unpack;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Candela CLI - authoring and inspection tool for probe-volume records
#[derive(Parser)]
#[command(name = "candela")]
#[command(about = "Authoring and inspection tool for probe-volume records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a volume configuration against the packed field widths
    Validate(validate::ValidateArgs),

    /// Encode a configuration into its 128-byte GPU record
    Pack(pack::PackArgs),

    /// Decode a 128-byte record back into a configuration
    Unpack(unpack::UnpackArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => validate::execute(args),
        Commands::Pack(args) => pack::execute(args),
        Commands::Unpack(args) => unpack::execute(args),
    }
}

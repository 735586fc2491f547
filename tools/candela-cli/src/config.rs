//! Volume configuration loading

use std::path::Path;

use anyhow::{Context, Result};
use candela_volume::VolumeDescriptor;

/// Load a volume descriptor from a JSON configuration file
pub fn load_descriptor(path: &Path) -> Result<VolumeDescriptor> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let descriptor: VolumeDescriptor = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse volume config: {}", path.display()))?;

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use candela_volume::{MovementType, VolumeDescriptor};

    #[test]
    fn test_descriptor_json_roundtrip() {
        let mut desc = VolumeDescriptor::default();
        desc.probe_num_rays = 144;
        desc.movement_type = MovementType::InfiniteScrolling;

        let json = serde_json::to_string(&desc).unwrap();
        let parsed: VolumeDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, desc);
    }
}

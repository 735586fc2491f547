//! Boundary validation for volume configurations
//!
//! Packing never fails: out-of-range fields alias onto their low bits, which
//! is wire-compatible but almost never what the author meant. Configuration
//! loaders run [`validate`] before the descriptor reaches [`pack`] and fail
//! fast on the first violation. The limits here are derived from the bit
//! widths declared in [`packing`](crate::packing), so the layout table stays
//! the single source of truth.
//!
//! [`pack`]: crate::descriptor::VolumeDescriptor::pack

use glam::IVec3;
use thiserror::Error;

use crate::descriptor::VolumeDescriptor;
use crate::packing::{
    IRRADIANCE_FORMAT, NUM_DISTANCE_INTERIOR_TEXELS, NUM_IRRADIANCE_INTERIOR_TEXELS,
    PROBE_COUNTS_X, PROBE_NUM_RAYS, RAY_DATA_FORMAT, SCROLL_MAGNITUDE_BITS,
};

/// Maximum probe count per axis (10-bit field)
pub const MAX_PROBE_COUNT: u32 = PROBE_COUNTS_X.max_value();
/// Maximum rays per probe (16-bit field)
pub const MAX_PROBE_NUM_RAYS: u32 = PROBE_NUM_RAYS.max_value();
/// Maximum interior texels per probe footprint (8-bit fields)
pub const MAX_INTERIOR_TEXELS: u32 = NUM_IRRADIANCE_INTERIOR_TEXELS.max_value();
/// Maximum scroll offset magnitude (15-bit magnitude)
pub const MAX_SCROLL_OFFSET: u32 = (1 << SCROLL_MAGNITUDE_BITS) - 1;
/// Maximum texture format selector (3-bit fields)
pub const MAX_TEXTURE_FORMAT: u32 = RAY_DATA_FORMAT.max_value();

/// A descriptor field that would alias or saturate when packed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("probe counts {counts} outside 0..={MAX_PROBE_COUNT} on at least one axis")]
    ProbeCountOutOfRange { counts: IVec3 },

    #[error("probe ray count {rays} exceeds {MAX_PROBE_NUM_RAYS}")]
    RayCountOutOfRange { rays: u32 },

    #[error("{kind} interior texel count {texels} exceeds {MAX_INTERIOR_TEXELS}")]
    TexelCountOutOfRange { kind: &'static str, texels: u32 },

    #[error("{name} = {value} outside the normalized range [0.0, 1.0]")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    #[error("scroll offsets {offsets} exceed magnitude {MAX_SCROLL_OFFSET}")]
    ScrollOffsetOutOfRange { offsets: IVec3 },

    #[error("{name} = {value} is not a 3-bit texture format selector")]
    FormatOutOfRange { name: &'static str, value: u32 },

    #[error("volume slot {slot} outside staging capacity {capacity}")]
    SlotOutOfRange { slot: usize, capacity: usize },
}

/// Check every field against its declared packed width
///
/// Returns the first violation found. A descriptor that passes packs and
/// round-trips without aliasing; production packing behavior is unchanged
/// whether or not this runs.
pub fn validate(desc: &VolumeDescriptor) -> Result<(), ConfigurationError> {
    let counts = desc.probe_counts;
    if counts.min_element() < 0 || counts.max_element() > MAX_PROBE_COUNT as i32 {
        return Err(ConfigurationError::ProbeCountOutOfRange { counts });
    }

    if desc.probe_num_rays > MAX_PROBE_NUM_RAYS {
        return Err(ConfigurationError::RayCountOutOfRange {
            rays: desc.probe_num_rays,
        });
    }
    if desc.probe_num_irradiance_interior_texels > NUM_IRRADIANCE_INTERIOR_TEXELS.max_value() {
        return Err(ConfigurationError::TexelCountOutOfRange {
            kind: "irradiance",
            texels: desc.probe_num_irradiance_interior_texels,
        });
    }
    if desc.probe_num_distance_interior_texels > NUM_DISTANCE_INTERIOR_TEXELS.max_value() {
        return Err(ConfigurationError::TexelCountOutOfRange {
            kind: "distance",
            texels: desc.probe_num_distance_interior_texels,
        });
    }

    let thresholds = [
        (
            "probe_random_ray_backface_threshold",
            desc.probe_random_ray_backface_threshold,
        ),
        (
            "probe_fixed_ray_backface_threshold",
            desc.probe_fixed_ray_backface_threshold,
        ),
    ];
    for (name, value) in thresholds {
        // NaN fails the range test too
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigurationError::ThresholdOutOfRange { name, value });
        }
    }

    let offsets = desc.probe_scroll_offsets;
    if [offsets.x, offsets.y, offsets.z]
        .iter()
        .any(|c| c.unsigned_abs() > MAX_SCROLL_OFFSET)
    {
        return Err(ConfigurationError::ScrollOffsetOutOfRange { offsets });
    }

    if desc.probe_ray_data_format > RAY_DATA_FORMAT.max_value() {
        return Err(ConfigurationError::FormatOutOfRange {
            name: "probe_ray_data_format",
            value: desc.probe_ray_data_format,
        });
    }
    if desc.probe_irradiance_format > IRRADIANCE_FORMAT.max_value() {
        return Err(ConfigurationError::FormatOutOfRange {
            name: "probe_irradiance_format",
            value: desc.probe_irradiance_format,
        });
    }

    Ok(())
}

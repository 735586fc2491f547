//! Unpacked probe-volume descriptor
//!
//! [`VolumeDescriptor`] is the authoritative, host-editable configuration of
//! one probe grid. Configuration code mutates it freely and re-packs it with
//! [`VolumeDescriptor::pack`] whenever a field changes; the packed form is a
//! transient view produced just before upload, never edited in place.

use glam::{IVec3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Probe grid movement mode, stored in one bit of the packed descriptor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// Grid stays fixed in world space
    #[default]
    Fixed = 0,
    /// Grid translates with the viewer, reusing probe memory via wraparound
    /// indexing and per-plane clears
    InfiniteScrolling = 1,
}

impl MovementType {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            MovementType::InfiniteScrolling
        } else {
            MovementType::Fixed
        }
    }

    pub fn to_bit(self) -> bool {
        matches!(self, MovementType::InfiniteScrolling)
    }
}

/// Configuration of one volumetric light-probe grid
///
/// Integer fields are wider in this struct than on the wire; each one is
/// masked to its declared bit width when packed (counts: 10 bits per axis,
/// rays: 16 bits, interior texels: 8 bits, scroll offsets: 15-bit magnitude
/// plus sign). Run [`validate`](crate::validate::validate) before packing to
/// reject values that would alias.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeDescriptor {
    /// World-space location of the volume center
    pub origin: Vec3,
    /// Rotation of the whole volume
    pub rotation: Quat,
    /// Per-frame rotation applied to probe ray directions
    pub probe_ray_rotation: Quat,

    /// World-space distance between probes on each axis
    pub probe_spacing: Vec3,
    /// Number of probes on each axis (0..=1023)
    pub probe_counts: IVec3,

    /// Rays traced per probe per update (0..=65535)
    pub probe_num_rays: u32,
    /// Texels in one dimension of a probe's irradiance footprint, border
    /// excluded (0..=255)
    pub probe_num_irradiance_interior_texels: u32,
    /// Texels in one dimension of a probe's distance footprint, border
    /// excluded (0..=255)
    pub probe_num_distance_interior_texels: u32,

    /// Weight of existing probe data when blending in a new update
    pub probe_hysteresis: f32,
    /// Maximum world-space distance a probe ray can travel
    pub probe_max_ray_distance: f32,
    /// Surface-normal offset applied when sampling, against self-shadowing
    pub probe_normal_bias: f32,
    /// View-ray offset applied when sampling
    pub probe_view_bias: f32,
    /// Exponent for distance-based visibility weighting
    pub probe_distance_exponent: f32,
    /// Perceptual exponent applied to stored irradiance
    pub probe_irradiance_encoding_gamma: f32,

    /// Per-texel change that counts as a large lighting shift
    pub probe_irradiance_threshold: f32,
    /// Maximum allowed brightness difference between updates
    pub probe_brightness_threshold: f32,
    /// Ratio of random rays allowed to hit backfaces before a probe counts
    /// as inside geometry (unorm16 on the wire)
    pub probe_random_ray_backface_threshold: f32,
    /// Ratio of fixed rays allowed to hit backfaces before a probe counts
    /// as inside geometry (unorm16 on the wire)
    pub probe_fixed_ray_backface_threshold: f32,
    /// Minimum distance to a frontface before relocation moves a probe
    pub probe_min_frontface_distance: f32,

    /// Grid-space scroll offsets (|value| <= 32767)
    pub probe_scroll_offsets: IVec3,
    /// Per-plane flags marking probes that must be reset after a scroll,
    /// in Y-Z, X-Z, X-Y plane order
    pub probe_scroll_clear: [bool; 3],
    /// Per-plane scroll direction (false: negative, true: positive),
    /// in Y-Z, X-Z, X-Y plane order
    pub probe_scroll_directions: [bool; 3],

    /// Movement mode of the grid
    pub movement_type: MovementType,
    /// Texture format selector for the ray data texture (3 bits on the wire;
    /// defined values are the consumer's contract)
    pub probe_ray_data_format: u32,
    /// Texture format selector for the irradiance texture (3 bits on the wire)
    pub probe_irradiance_format: u32,
    /// Whether probe relocation runs for this volume
    pub probe_relocation_enabled: bool,
    /// Whether probe classification runs for this volume
    pub probe_classification_enabled: bool,
    /// Whether probe variability tracking runs for this volume
    pub probe_variability_enabled: bool,
}

impl Default for VolumeDescriptor {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            probe_ray_rotation: Quat::IDENTITY,
            probe_spacing: Vec3::ONE,
            probe_counts: IVec3::ZERO,
            probe_num_rays: 0,
            probe_num_irradiance_interior_texels: 0,
            probe_num_distance_interior_texels: 0,
            probe_hysteresis: 0.0,
            probe_max_ray_distance: 0.0,
            probe_normal_bias: 0.0,
            probe_view_bias: 0.0,
            probe_distance_exponent: 0.0,
            probe_irradiance_encoding_gamma: 0.0,
            probe_irradiance_threshold: 0.0,
            probe_brightness_threshold: 0.0,
            probe_random_ray_backface_threshold: 0.0,
            probe_fixed_ray_backface_threshold: 0.0,
            probe_min_frontface_distance: 0.0,
            probe_scroll_offsets: IVec3::ZERO,
            probe_scroll_clear: [false; 3],
            probe_scroll_directions: [false; 3],
            movement_type: MovementType::Fixed,
            probe_ray_data_format: 0,
            probe_irradiance_format: 0,
            probe_relocation_enabled: false,
            probe_classification_enabled: false,
            probe_variability_enabled: false,
        }
    }
}

//! Packed probe-volume descriptor (128-byte GPU constant record)
//!
//! Shading passes read one of these per volume from a structured buffer,
//! addressing fields by raw byte offset, so the layout below is wire format
//! shared across host and shader toolchains. All multi-byte values are
//! little-endian.
//!
//! # Layout
//! ```text
//! 0x00: origin                          [f32; 3]
//! 0x0C: probe_hysteresis                f32
//! 0x10: rotation                        [f32; 4]
//! 0x20: probe_ray_rotation              [f32; 4]
//! 0x30: probe_max_ray_distance          f32
//! 0x34: probe_normal_bias               f32
//! 0x38: probe_view_bias                 f32
//! 0x3C: probe_distance_exponent         f32
//! 0x40: probe_irradiance_encoding_gamma f32
//! 0x44: probe_irradiance_threshold      f32
//! 0x48: probe_brightness_threshold      f32
//! 0x4C: probe_min_frontface_distance    f32
//! 0x50: probe_spacing                   [f32; 3]
//! 0x5C: packed0                         u32
//! 0x60: packed1                         u32
//! 0x64: packed2                         u32
//! 0x68: packed3                         u32
//! 0x6C: packed4                         u32
//! 0x70: reserved                        [u32; 4] (always zero)
//! ```
//!
//! Bit assignments inside `packed0..packed4` are declared in
//! [`packing`](crate::packing).

use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Quat, Vec3};

use crate::descriptor::{MovementType, VolumeDescriptor};
use crate::packing::{
    CLASSIFICATION_ENABLED, FIXED_RAY_BACKFACE_THRESHOLD, IRRADIANCE_FORMAT, MOVEMENT_TYPE,
    NUM_DISTANCE_INTERIOR_TEXELS, NUM_IRRADIANCE_INTERIOR_TEXELS, PROBE_COUNTS_X, PROBE_COUNTS_Y,
    PROBE_COUNTS_Z, PROBE_NUM_RAYS, PROBE_SCROLL_X, PROBE_SCROLL_Y, PROBE_SCROLL_Z,
    RANDOM_RAY_BACKFACE_THRESHOLD, RAY_DATA_FORMAT, RELOCATION_ENABLED, SCROLL_CLEAR_XY,
    SCROLL_CLEAR_XZ, SCROLL_CLEAR_YZ, SCROLL_DIRECTION_XY, SCROLL_DIRECTION_XZ,
    SCROLL_DIRECTION_YZ, VARIABILITY_ENABLED, pack_signed_mag15, pack_unorm16,
    unpack_signed_mag15, unpack_unorm16,
};

/// One volume's configuration in GPU constant form (128 bytes)
///
/// Full-precision floats keep their exact bit patterns; integer, boolean,
/// and quantized fields share the five `packed*` words. The trailing 16
/// reserved bytes are zero so shaders built against later revisions can
/// claim them without breaking current ones.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVolumeDescriptor {
    pub origin: [f32; 3],
    pub probe_hysteresis: f32,
    pub rotation: [f32; 4],
    pub probe_ray_rotation: [f32; 4],
    pub probe_max_ray_distance: f32,
    pub probe_normal_bias: f32,
    pub probe_view_bias: f32,
    pub probe_distance_exponent: f32,
    pub probe_irradiance_encoding_gamma: f32,
    pub probe_irradiance_threshold: f32,
    pub probe_brightness_threshold: f32,
    pub probe_min_frontface_distance: f32,
    pub probe_spacing: [f32; 3],
    /// probe_counts x (10) | y (10) | z (10) | unused (2)
    pub packed0: u32,
    /// random-ray backface threshold unorm16 (16) | fixed-ray backface threshold unorm16 (16)
    pub packed1: u32,
    /// probe_num_rays (16) | irradiance interior texels (8) | distance interior texels (8)
    pub packed2: u32,
    /// scroll offset x sign-magnitude (16) | scroll offset y sign-magnitude (16)
    pub packed3: u32,
    /// scroll offset z sign-magnitude (16) | movement type (1) | ray data format (3)
    /// | irradiance format (3) | relocation (1) | classification (1) | variability (1)
    /// | scroll clear Y-Z/X-Z/X-Y (3) | scroll direction Y-Z/X-Z/X-Y (3)
    pub packed4: u32,
    /// Reserved for future revisions, always zero
    pub reserved: [u32; 4],
}

impl PackedVolumeDescriptor {
    pub const SIZE: usize = 128;

    /// Write the record to bytes (little-endian)
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes.copy_from_slice(bytemuck::bytes_of(self));
        bytes
    }

    /// Read a record from bytes
    ///
    /// Returns `None` only when the slice is shorter than [`Self::SIZE`];
    /// every 128-byte pattern is a structurally valid record.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(bytemuck::pod_read_unaligned(&bytes[..Self::SIZE]))
    }

    /// Expand back to the typed descriptor
    ///
    /// Total inverse of [`VolumeDescriptor::pack`]: every field except the
    /// two backface thresholds comes back exactly; the thresholds come back
    /// within 1/65535 of the packed source value. Format selectors are
    /// returned as stored without checking that they name a defined format.
    pub fn unpack(&self) -> VolumeDescriptor {
        VolumeDescriptor {
            origin: Vec3::from_array(self.origin),
            rotation: Quat::from_array(self.rotation),
            probe_ray_rotation: Quat::from_array(self.probe_ray_rotation),
            probe_spacing: Vec3::from_array(self.probe_spacing),
            probe_counts: IVec3::new(
                PROBE_COUNTS_X.extract(self.packed0) as i32,
                PROBE_COUNTS_Y.extract(self.packed0) as i32,
                PROBE_COUNTS_Z.extract(self.packed0) as i32,
            ),
            probe_num_rays: PROBE_NUM_RAYS.extract(self.packed2),
            probe_num_irradiance_interior_texels: NUM_IRRADIANCE_INTERIOR_TEXELS
                .extract(self.packed2),
            probe_num_distance_interior_texels: NUM_DISTANCE_INTERIOR_TEXELS.extract(self.packed2),
            probe_hysteresis: self.probe_hysteresis,
            probe_max_ray_distance: self.probe_max_ray_distance,
            probe_normal_bias: self.probe_normal_bias,
            probe_view_bias: self.probe_view_bias,
            probe_distance_exponent: self.probe_distance_exponent,
            probe_irradiance_encoding_gamma: self.probe_irradiance_encoding_gamma,
            probe_irradiance_threshold: self.probe_irradiance_threshold,
            probe_brightness_threshold: self.probe_brightness_threshold,
            probe_random_ray_backface_threshold: unpack_unorm16(
                RANDOM_RAY_BACKFACE_THRESHOLD.extract(self.packed1),
            ),
            probe_fixed_ray_backface_threshold: unpack_unorm16(
                FIXED_RAY_BACKFACE_THRESHOLD.extract(self.packed1),
            ),
            probe_min_frontface_distance: self.probe_min_frontface_distance,
            probe_scroll_offsets: IVec3::new(
                unpack_signed_mag15(PROBE_SCROLL_X.extract(self.packed3)),
                unpack_signed_mag15(PROBE_SCROLL_Y.extract(self.packed3)),
                unpack_signed_mag15(PROBE_SCROLL_Z.extract(self.packed4)),
            ),
            probe_scroll_clear: [
                SCROLL_CLEAR_YZ.extract(self.packed4) != 0,
                SCROLL_CLEAR_XZ.extract(self.packed4) != 0,
                SCROLL_CLEAR_XY.extract(self.packed4) != 0,
            ],
            probe_scroll_directions: [
                SCROLL_DIRECTION_YZ.extract(self.packed4) != 0,
                SCROLL_DIRECTION_XZ.extract(self.packed4) != 0,
                SCROLL_DIRECTION_XY.extract(self.packed4) != 0,
            ],
            movement_type: MovementType::from_bit(MOVEMENT_TYPE.extract(self.packed4) != 0),
            probe_ray_data_format: RAY_DATA_FORMAT.extract(self.packed4),
            probe_irradiance_format: IRRADIANCE_FORMAT.extract(self.packed4),
            probe_relocation_enabled: RELOCATION_ENABLED.extract(self.packed4) != 0,
            probe_classification_enabled: CLASSIFICATION_ENABLED.extract(self.packed4) != 0,
            probe_variability_enabled: VARIABILITY_ENABLED.extract(self.packed4) != 0,
        }
    }
}

impl VolumeDescriptor {
    /// Pack into the 128-byte GPU constant record
    ///
    /// Pure and infallible. Integer fields wider than their declared bit
    /// width alias silently (high bits dropped) and the two backface
    /// thresholds are quantized to unorm16; run
    /// [`validate`](crate::validate::validate) at the configuration boundary
    /// to catch out-of-range values before they reach the GPU.
    pub fn pack(&self) -> PackedVolumeDescriptor {
        let mut packed0 = 0;
        packed0 = PROBE_COUNTS_X.insert(packed0, self.probe_counts.x as u32);
        packed0 = PROBE_COUNTS_Y.insert(packed0, self.probe_counts.y as u32);
        packed0 = PROBE_COUNTS_Z.insert(packed0, self.probe_counts.z as u32);

        let mut packed1 = 0;
        packed1 = RANDOM_RAY_BACKFACE_THRESHOLD
            .insert(packed1, pack_unorm16(self.probe_random_ray_backface_threshold));
        packed1 = FIXED_RAY_BACKFACE_THRESHOLD
            .insert(packed1, pack_unorm16(self.probe_fixed_ray_backface_threshold));

        let mut packed2 = 0;
        packed2 = PROBE_NUM_RAYS.insert(packed2, self.probe_num_rays);
        packed2 = NUM_IRRADIANCE_INTERIOR_TEXELS
            .insert(packed2, self.probe_num_irradiance_interior_texels);
        packed2 =
            NUM_DISTANCE_INTERIOR_TEXELS.insert(packed2, self.probe_num_distance_interior_texels);

        let mut packed3 = 0;
        packed3 = PROBE_SCROLL_X.insert(packed3, pack_signed_mag15(self.probe_scroll_offsets.x));
        packed3 = PROBE_SCROLL_Y.insert(packed3, pack_signed_mag15(self.probe_scroll_offsets.y));

        let mut packed4 = 0;
        packed4 = PROBE_SCROLL_Z.insert(packed4, pack_signed_mag15(self.probe_scroll_offsets.z));
        packed4 = MOVEMENT_TYPE.insert(packed4, self.movement_type.to_bit() as u32);
        packed4 = RAY_DATA_FORMAT.insert(packed4, self.probe_ray_data_format);
        packed4 = IRRADIANCE_FORMAT.insert(packed4, self.probe_irradiance_format);
        packed4 = RELOCATION_ENABLED.insert(packed4, self.probe_relocation_enabled as u32);
        packed4 = CLASSIFICATION_ENABLED.insert(packed4, self.probe_classification_enabled as u32);
        packed4 = VARIABILITY_ENABLED.insert(packed4, self.probe_variability_enabled as u32);
        packed4 = SCROLL_CLEAR_YZ.insert(packed4, self.probe_scroll_clear[0] as u32);
        packed4 = SCROLL_CLEAR_XZ.insert(packed4, self.probe_scroll_clear[1] as u32);
        packed4 = SCROLL_CLEAR_XY.insert(packed4, self.probe_scroll_clear[2] as u32);
        packed4 = SCROLL_DIRECTION_YZ.insert(packed4, self.probe_scroll_directions[0] as u32);
        packed4 = SCROLL_DIRECTION_XZ.insert(packed4, self.probe_scroll_directions[1] as u32);
        packed4 = SCROLL_DIRECTION_XY.insert(packed4, self.probe_scroll_directions[2] as u32);

        PackedVolumeDescriptor {
            origin: self.origin.to_array(),
            probe_hysteresis: self.probe_hysteresis,
            rotation: self.rotation.to_array(),
            probe_ray_rotation: self.probe_ray_rotation.to_array(),
            probe_max_ray_distance: self.probe_max_ray_distance,
            probe_normal_bias: self.probe_normal_bias,
            probe_view_bias: self.probe_view_bias,
            probe_distance_exponent: self.probe_distance_exponent,
            probe_irradiance_encoding_gamma: self.probe_irradiance_encoding_gamma,
            probe_irradiance_threshold: self.probe_irradiance_threshold,
            probe_brightness_threshold: self.probe_brightness_threshold,
            probe_min_frontface_distance: self.probe_min_frontface_distance,
            probe_spacing: self.probe_spacing.to_array(),
            packed0,
            packed1,
            packed2,
            packed3,
            packed4,
            reserved: [0; 4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Descriptor exercising every field with a distinct in-range value
    fn full_descriptor() -> VolumeDescriptor {
        VolumeDescriptor {
            origin: Vec3::new(1.5, -2.0, 3.25),
            rotation: Quat::from_xyzw(0.0, 0.3826834, 0.0, 0.9238795),
            probe_ray_rotation: Quat::from_xyzw(0.5, 0.5, 0.5, 0.5),
            probe_spacing: Vec3::new(0.75, 1.0, 1.25),
            probe_counts: IVec3::new(22, 8, 22),
            probe_num_rays: 288,
            probe_num_irradiance_interior_texels: 8,
            probe_num_distance_interior_texels: 16,
            probe_hysteresis: 0.97,
            probe_max_ray_distance: 1000.0,
            probe_normal_bias: 0.1,
            probe_view_bias: 0.3,
            probe_distance_exponent: 50.0,
            probe_irradiance_encoding_gamma: 5.0,
            probe_irradiance_threshold: 0.2,
            probe_brightness_threshold: 2.0,
            probe_random_ray_backface_threshold: 0.1,
            probe_fixed_ray_backface_threshold: 0.25,
            probe_min_frontface_distance: 0.3,
            probe_scroll_offsets: IVec3::new(-12, 0, 345),
            probe_scroll_clear: [true, false, true],
            probe_scroll_directions: [false, true, false],
            movement_type: MovementType::InfiniteScrolling,
            probe_ray_data_format: 5,
            probe_irradiance_format: 3,
            probe_relocation_enabled: true,
            probe_classification_enabled: false,
            probe_variability_enabled: true,
        }
    }

    #[test]
    fn test_packed_size_is_128() {
        assert_eq!(std::mem::size_of::<PackedVolumeDescriptor>(), 128);
        assert_eq!(PackedVolumeDescriptor::SIZE, 128);
    }

    #[test]
    fn test_size_independent_of_features() {
        let mut desc = full_descriptor();
        assert_eq!(desc.pack().to_bytes().len(), 128);
        desc.movement_type = MovementType::Fixed;
        desc.probe_relocation_enabled = false;
        desc.probe_classification_enabled = false;
        desc.probe_variability_enabled = false;
        assert_eq!(desc.pack().to_bytes().len(), 128);
    }

    #[test]
    fn test_field_byte_offsets() {
        let mut desc = VolumeDescriptor::default();
        desc.origin = Vec3::new(1.0, 2.0, 3.0);
        desc.probe_hysteresis = 4.0;
        desc.probe_spacing = Vec3::new(5.0, 6.0, 7.0);
        desc.probe_counts = IVec3::new(1, 0, 0);
        let bytes = desc.pack().to_bytes();

        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &2.0f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &3.0f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &4.0f32.to_le_bytes());
        // identity quaternion at rotation, w at offset 28
        assert_eq!(&bytes[16..20], &0.0f32.to_le_bytes());
        assert_eq!(&bytes[28..32], &1.0f32.to_le_bytes());
        // probe_spacing row starts at 0x50
        assert_eq!(&bytes[80..84], &5.0f32.to_le_bytes());
        assert_eq!(&bytes[88..92], &7.0f32.to_le_bytes());
        // packed0 at 0x5C holds counts.x in its low bits
        assert_eq!(&bytes[92..96], &1u32.to_le_bytes());
    }

    #[test]
    fn test_reserved_bytes_are_zero() {
        let bytes = full_descriptor().pack().to_bytes();
        assert_eq!(&bytes[112..128], &[0u8; 16]);
    }

    #[test]
    fn test_roundtrip_exact_except_thresholds() {
        let desc = full_descriptor();
        let restored = desc.pack().unpack();

        assert_eq!(restored.origin, desc.origin);
        assert_eq!(restored.rotation, desc.rotation);
        assert_eq!(restored.probe_ray_rotation, desc.probe_ray_rotation);
        assert_eq!(restored.probe_spacing, desc.probe_spacing);
        assert_eq!(restored.probe_counts, desc.probe_counts);
        assert_eq!(restored.probe_num_rays, desc.probe_num_rays);
        assert_eq!(
            restored.probe_num_irradiance_interior_texels,
            desc.probe_num_irradiance_interior_texels
        );
        assert_eq!(
            restored.probe_num_distance_interior_texels,
            desc.probe_num_distance_interior_texels
        );
        assert_eq!(restored.probe_hysteresis, desc.probe_hysteresis);
        assert_eq!(restored.probe_max_ray_distance, desc.probe_max_ray_distance);
        assert_eq!(restored.probe_normal_bias, desc.probe_normal_bias);
        assert_eq!(restored.probe_view_bias, desc.probe_view_bias);
        assert_eq!(restored.probe_distance_exponent, desc.probe_distance_exponent);
        assert_eq!(
            restored.probe_irradiance_encoding_gamma,
            desc.probe_irradiance_encoding_gamma
        );
        assert_eq!(
            restored.probe_irradiance_threshold,
            desc.probe_irradiance_threshold
        );
        assert_eq!(
            restored.probe_brightness_threshold,
            desc.probe_brightness_threshold
        );
        assert_eq!(
            restored.probe_min_frontface_distance,
            desc.probe_min_frontface_distance
        );
        assert_eq!(restored.probe_scroll_offsets, desc.probe_scroll_offsets);
        assert_eq!(restored.probe_scroll_clear, desc.probe_scroll_clear);
        assert_eq!(restored.probe_scroll_directions, desc.probe_scroll_directions);
        assert_eq!(restored.movement_type, desc.movement_type);
        assert_eq!(restored.probe_ray_data_format, desc.probe_ray_data_format);
        assert_eq!(restored.probe_irradiance_format, desc.probe_irradiance_format);
        assert_eq!(restored.probe_relocation_enabled, desc.probe_relocation_enabled);
        assert_eq!(
            restored.probe_classification_enabled,
            desc.probe_classification_enabled
        );
        assert_eq!(restored.probe_variability_enabled, desc.probe_variability_enabled);

        // Quantized thresholds come back within the unorm16 step
        assert!(
            (restored.probe_random_ray_backface_threshold
                - desc.probe_random_ray_backface_threshold)
                .abs()
                <= 1.0 / 65535.0
        );
        assert!(
            (restored.probe_fixed_ray_backface_threshold
                - desc.probe_fixed_ray_backface_threshold)
                .abs()
                <= 1.0 / 65535.0
        );
    }

    #[test]
    fn test_threshold_quantization_sweep() {
        for i in 0..=64 {
            let t = i as f32 / 64.0;
            let mut desc = VolumeDescriptor::default();
            desc.probe_random_ray_backface_threshold = t;
            let restored = desc.pack().unpack();
            assert!(
                (restored.probe_random_ray_backface_threshold - t).abs() <= 1.0 / 65535.0,
                "error too large at t={t}"
            );
        }
    }

    #[test]
    fn test_scroll_offsets_sign_magnitude() {
        for offsets in [
            IVec3::new(-32767, 32767, 0),
            IVec3::new(-5, 0, 7),
            IVec3::new(0, -1, 1),
        ] {
            let mut desc = VolumeDescriptor::default();
            desc.probe_scroll_offsets = offsets;
            assert_eq!(desc.pack().unpack().probe_scroll_offsets, offsets);
        }
        // Zero always encodes with the sign bit clear
        let packed = VolumeDescriptor::default().pack();
        assert_eq!(packed.packed3, 0);
        assert_eq!(packed.packed4 & 0xFFFF, 0);
    }

    #[test]
    fn test_boundary_values_roundtrip() {
        let mut desc = VolumeDescriptor::default();
        desc.probe_counts = IVec3::new(1023, 1023, 1023);
        desc.probe_num_rays = 65535;
        desc.probe_num_irradiance_interior_texels = 255;
        desc.probe_num_distance_interior_texels = 255;
        let restored = desc.pack().unpack();
        assert_eq!(restored.probe_counts, IVec3::new(1023, 1023, 1023));
        assert_eq!(restored.probe_num_rays, 65535);
        assert_eq!(restored.probe_num_irradiance_interior_texels, 255);
        assert_eq!(restored.probe_num_distance_interior_texels, 255);
    }

    #[test]
    fn test_out_of_range_count_aliases_to_zero() {
        let mut desc = VolumeDescriptor::default();
        desc.probe_counts = IVec3::new(1024, 0, 0);
        assert_eq!(desc.pack().unpack().probe_counts.x, 0);
    }

    #[test]
    fn test_single_field_edit_is_isolated() {
        let base = full_descriptor().pack();

        let mut edited = full_descriptor();
        edited.probe_num_rays = 77;
        let packed = edited.pack();

        // Only packed2's low 16 bits may differ
        assert_eq!(packed.packed0, base.packed0);
        assert_eq!(packed.packed1, base.packed1);
        assert_eq!(packed.packed2 >> 16, base.packed2 >> 16);
        assert_ne!(packed.packed2 & 0xFFFF, base.packed2 & 0xFFFF);
        assert_eq!(packed.packed3, base.packed3);
        assert_eq!(packed.packed4, base.packed4);
        assert_eq!(packed.origin, base.origin);

        // A float edit leaves every packed word alone
        let mut edited = full_descriptor();
        edited.probe_view_bias = 9.0;
        let packed = edited.pack();
        assert_eq!(packed.packed0, base.packed0);
        assert_eq!(packed.packed1, base.packed1);
        assert_eq!(packed.packed2, base.packed2);
        assert_eq!(packed.packed3, base.packed3);
        assert_eq!(packed.packed4, base.packed4);
        let base_bytes = base.to_bytes();
        let bytes = packed.to_bytes();
        assert_eq!(&bytes[..56], &base_bytes[..56]);
        assert_eq!(&bytes[60..], &base_bytes[60..]);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let packed = full_descriptor().pack();
        let bytes = packed.to_bytes();
        let restored = PackedVolumeDescriptor::from_bytes(&bytes).unwrap();
        assert_eq!(restored, packed);
    }

    #[test]
    fn test_from_bytes_short_slice() {
        assert!(PackedVolumeDescriptor::from_bytes(&[0u8; 127]).is_none());
    }

    #[test]
    fn test_decode_of_garbage_is_structurally_valid() {
        let mut bytes = [0u8; 128];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        let desc = PackedVolumeDescriptor::from_bytes(&bytes).unwrap().unpack();
        // Decoded integer fields always land inside their declared widths
        assert!(desc.probe_counts.max_element() <= 1023);
        assert!(desc.probe_counts.min_element() >= 0);
        assert!(desc.probe_num_rays <= 65535);
        assert!(desc.probe_ray_data_format <= 7);
        assert!(desc.probe_scroll_offsets.x.abs() <= 32767);
    }

    #[test]
    fn test_concrete_scenario() {
        let mut desc = VolumeDescriptor::default();
        desc.origin = Vec3::new(1.5, -2.0, 3.25);
        desc.probe_counts = IVec3::new(10, 10, 4);
        desc.probe_num_rays = 144;
        desc.movement_type = MovementType::InfiniteScrolling;
        desc.probe_scroll_offsets = IVec3::new(-3, 0, 7);
        desc.probe_relocation_enabled = true;

        let restored = desc.pack().unpack();
        assert_eq!(restored, desc);
    }
}

//! Bindless resource index table for one volume
//!
//! Shaders locate a volume's textures through large bindless descriptor
//! arrays rather than per-draw bindings; this record carries the array
//! positions. Unlike the packed descriptor there is no bit packing: each
//! field occupies one 32-bit slot in declaration order, and the record sits
//! in a per-volume structured buffer parallel to the descriptor buffer.

use bytemuck::{Pod, Zeroable};

/// Positions of one volume's GPU resources in bindless arrays (72 bytes)
///
/// UAV/SRV index pairs for each texture, followed by one storage handle per
/// resource. Produced by the resource-allocation layer whenever a volume's
/// textures are (re)created.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct VolumeResourceIndices {
    pub ray_data_uav_index: u32,
    pub ray_data_srv_index: u32,
    pub probe_irradiance_uav_index: u32,
    pub probe_irradiance_srv_index: u32,
    pub probe_distance_uav_index: u32,
    pub probe_distance_srv_index: u32,
    pub probe_data_uav_index: u32,
    pub probe_data_srv_index: u32,
    pub probe_variability_uav_index: u32,
    pub probe_variability_srv_index: u32,
    pub probe_variability_average_uav_index: u32,
    pub probe_variability_average_srv_index: u32,
    pub ray_data_handle_storage: u32,
    pub probe_irradiance_handle_storage: u32,
    pub probe_distance_handle_storage: u32,
    pub probe_data_handle_storage: u32,
    pub probe_variability_handle_storage: u32,
    pub probe_variability_average_handle_storage: u32,
}

impl VolumeResourceIndices {
    pub const SIZE: usize = 72;

    /// Write the record to bytes (little-endian)
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes.copy_from_slice(bytemuck::bytes_of(self));
        bytes
    }

    /// Read a record from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(bytemuck::pod_read_unaligned(&bytes[..Self::SIZE]))
    }
}

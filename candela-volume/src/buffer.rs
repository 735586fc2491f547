//! Host-side staging for per-volume GPU constant buffers
//!
//! Shading passes read every volume's packed descriptor from one structured
//! buffer and its bindless resource indices from a parallel buffer, both
//! indexed by volume slot. [`ConstantsStaging`] owns the host copies of
//! those two byte ranges; the graphics layer uploads them as-is.
//!
//! Each volume owns exactly one slot. Writes to distinct slots are
//! independent, but a caller that re-encodes a slot while an upload of the
//! same bytes is in flight must double-buffer or fence on its side.

use crate::packed::PackedVolumeDescriptor;
use crate::resources::VolumeResourceIndices;
use crate::validate::ConfigurationError;

/// Byte images of the per-volume descriptor and resource-index buffers
#[derive(Debug, Clone)]
pub struct ConstantsStaging {
    descriptors: Vec<u8>,
    resource_indices: Vec<u8>,
    volume_count: usize,
}

impl ConstantsStaging {
    /// Allocate zeroed staging for `volume_count` slots
    ///
    /// A zeroed slot decodes as a neutral all-features-off descriptor, so
    /// unwritten slots are harmless if a shader reads one.
    pub fn new(volume_count: usize) -> Self {
        Self {
            descriptors: vec![0; volume_count * PackedVolumeDescriptor::SIZE],
            resource_indices: vec![0; volume_count * VolumeResourceIndices::SIZE],
            volume_count,
        }
    }

    pub fn volume_count(&self) -> usize {
        self.volume_count
    }

    /// Write one volume's packed descriptor into its slot
    pub fn write_descriptor(
        &mut self,
        slot: usize,
        descriptor: &PackedVolumeDescriptor,
    ) -> Result<(), ConfigurationError> {
        let offset = self.slot_offset(slot, PackedVolumeDescriptor::SIZE)?;
        self.descriptors[offset..offset + PackedVolumeDescriptor::SIZE]
            .copy_from_slice(&descriptor.to_bytes());
        Ok(())
    }

    /// Write one volume's resource indices into its slot
    pub fn write_resource_indices(
        &mut self,
        slot: usize,
        indices: &VolumeResourceIndices,
    ) -> Result<(), ConfigurationError> {
        let offset = self.slot_offset(slot, VolumeResourceIndices::SIZE)?;
        self.resource_indices[offset..offset + VolumeResourceIndices::SIZE]
            .copy_from_slice(&indices.to_bytes());
        Ok(())
    }

    /// Read a slot's descriptor back from the staged bytes
    pub fn descriptor(&self, slot: usize) -> Option<PackedVolumeDescriptor> {
        let offset = self.slot_offset(slot, PackedVolumeDescriptor::SIZE).ok()?;
        PackedVolumeDescriptor::from_bytes(&self.descriptors[offset..])
    }

    /// Full descriptor buffer, `volume_count * 128` bytes
    pub fn descriptor_bytes(&self) -> &[u8] {
        &self.descriptors
    }

    /// Full resource-index buffer, `volume_count * 72` bytes
    pub fn resource_index_bytes(&self) -> &[u8] {
        &self.resource_indices
    }

    fn slot_offset(&self, slot: usize, stride: usize) -> Result<usize, ConfigurationError> {
        if slot >= self.volume_count {
            return Err(ConfigurationError::SlotOutOfRange {
                slot,
                capacity: self.volume_count,
            });
        }
        Ok(slot * stride)
    }
}

//! Probe-volume configuration transport for GPU constant storage
//!
//! This crate describes volumetric light-probe grids on the host side and
//! converts their configuration to and from the fixed 128-byte records that
//! real-time shading passes read from GPU constant buffers. The conversions
//! are pure value transforms: no allocation, no I/O, no failure paths, safe
//! to run concurrently on independent descriptors.
//!
//! # Modules
//!
//! - [`descriptor`] - Typed, host-editable volume configuration
//! - [`packed`] - The 128-byte wire record and the pack/unpack conversions
//! - [`packing`] - Bit-field layout tables and scalar quantization helpers
//! - [`resources`] - Bindless resource index table shaders consume alongside
//! - [`validate`] - Fail-fast range checks for configuration boundaries
//! - [`buffer`] - Per-volume slot staging for the GPU constant buffers

pub mod buffer;
pub mod descriptor;
pub mod packed;
pub mod packing;
pub mod resources;
pub mod validate;

pub use buffer::ConstantsStaging;
pub use descriptor::{MovementType, VolumeDescriptor};
pub use packed::PackedVolumeDescriptor;
pub use packing::{
    BitField, pack_signed_mag15, pack_unorm16, unpack_signed_mag15, unpack_unorm16,
};
pub use resources::VolumeResourceIndices;
pub use validate::{
    ConfigurationError, MAX_INTERIOR_TEXELS, MAX_PROBE_COUNT, MAX_PROBE_NUM_RAYS,
    MAX_SCROLL_OFFSET, MAX_TEXTURE_FORMAT, validate,
};

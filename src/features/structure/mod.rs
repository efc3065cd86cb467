//! Structural segmentation
//!
//! Reduces the track to a fixed-length energy profile, then walks the
//! smoothed profile with an energy-derivative cascade to produce labeled,
//! contiguous sections covering the full duration.

pub mod energy;
pub mod segmenter;

pub use energy::energy_profile;
pub use segmenter::segment_sections;

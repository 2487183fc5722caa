//! Raster storage and the primitives shapes and comparators are built from
//!
//! This module contains:
//! - The `Raster` grid with content identity, slicing and compositing
//! - Padding and single-edge growth
//! - Binary dilation used by the comparator pyramid

/// Binary dilation in four and eight connectivity
pub mod dilation;
/// Padding into fresh or caller-supplied rasters and edge growth
pub mod extension;
/// Raster storage, identity and compositing
pub mod grid;
/// Point-sampled upscaling for grid-scaled shapes
pub mod scale;

pub use dilation::Connectivity;
pub use extension::Padding;
pub use grid::Raster;

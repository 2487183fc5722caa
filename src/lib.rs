//! Best-first search over procedurally generated raster shapes
//!
//! Shapes are produced by small generative rules (squares, rectangles, towers,
//! rings, chains and their grid-scaled forms) and explored with a best-first
//! search ordered by a comparator's estimate of how well each shape fits a
//! reference raster. Repeating the search against the uncovered residual
//! decomposes an image into primitive shapes.

/// Candidate scoring against a reference raster
pub mod comparator;
/// Input/output operations, configuration and error handling
pub mod io;
/// Raster storage and primitives
pub mod raster;
/// Best-first search engine and drivers
pub mod search;
/// Shape states and the variant catalogue
pub mod shape;

pub use io::error::{Result, SearchError};

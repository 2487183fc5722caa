//! JSON persistence of shape states
//!
//! Rasters are stored flattened as width, height and row-major cells so the
//! format does not depend on the in-memory array type. Transforms are never
//! stored; they come back from the variant tag when the state is rebuilt.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::io::error::{Result, SearchError};
use crate::raster::grid::Raster;
use crate::shape::state::{ShapeFields, ShapeParts, ShapeState};
use crate::shape::variant::Variant;

/// Raster stored as dimensions plus row-major cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRaster {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Row-major cell values
    pub cells: Vec<i32>,
}

impl From<&Raster> for FlatRaster {
    fn from(raster: &Raster) -> Self {
        Self {
            width: raster.cols(),
            height: raster.rows(),
            cells: raster.to_flat(),
        }
    }
}

impl TryFrom<FlatRaster> for Raster {
    type Error = SearchError;

    fn try_from(flat: FlatRaster) -> Result<Self> {
        Self::from_flat(flat.height, flat.width, flat.cells)
    }
}

/// Serialized form of a [`ShapeState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Variant tag
    pub variant: Variant,
    /// Family-specific parameters
    pub fields: ShapeFields,
    /// Rendered raster
    pub raster: FlatRaster,
    /// Unit-resolution raster of grid variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical: Option<FlatRaster>,
    /// Grid spacing
    pub scale: usize,
    /// Accumulated cost
    pub cost: u32,
    /// Cost bound
    pub max_cost: u32,
    /// Comparator distance, if scored
    pub heuristic: Option<u64>,
    /// Placement `[row, col]`
    pub offset: [usize; 2],
    /// Per-transform costs
    pub transform_costs: Vec<u32>,
}

impl From<&ShapeState> for StateRecord {
    fn from(state: &ShapeState) -> Self {
        Self {
            variant: state.variant(),
            fields: state.fields().clone(),
            raster: FlatRaster::from(state.raster()),
            logical: state
                .variant()
                .is_grid()
                .then(|| FlatRaster::from(state.logical())),
            scale: state.scale(),
            cost: state.cost(),
            max_cost: state.max_cost(),
            heuristic: state.heuristic(),
            offset: state.offset(),
            transform_costs: state.transform_costs().to_vec(),
        }
    }
}

impl TryFrom<StateRecord> for ShapeState {
    type Error = SearchError;

    fn try_from(record: StateRecord) -> Result<Self> {
        Self::from_parts(ShapeParts {
            variant: record.variant,
            fields: record.fields,
            raster: Raster::try_from(record.raster)?,
            logical: record.logical.map(Raster::try_from).transpose()?,
            scale: record.scale,
            cost: record.cost,
            max_cost: record.max_cost,
            heuristic: record.heuristic,
            offset: record.offset,
            transform_costs: record.transform_costs,
        })
    }
}

/// Serialize a state to JSON bytes
///
/// # Errors
///
/// Returns an error if JSON encoding fails
pub fn serialize_state(state: &ShapeState) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&StateRecord::from(state))?)
}

/// Rebuild a state of `variant` from JSON bytes
///
/// # Errors
///
/// Returns an error if the bytes are not a valid record, the record belongs
/// to a different variant, or its fields are inconsistent
pub fn deserialize_state(bytes: &[u8], variant: Variant) -> Result<ShapeState> {
    let record: StateRecord = serde_json::from_slice(bytes)?;
    if record.variant != variant {
        return Err(SearchError::VariantMismatch {
            expected: variant.to_string(),
            found: record.variant.to_string(),
        });
    }
    ShapeState::try_from(record)
}

/// Write a state to a JSON file
///
/// # Errors
///
/// Returns an error if encoding or writing fails
pub fn save_state(state: &ShapeState, path: &Path) -> Result<()> {
    let bytes = serialize_state(state)?;
    fs::write(path, bytes).map_err(|source| SearchError::FileSystem {
        path: path.to_path_buf(),
        operation: "write state",
        source,
    })
}

/// Read a state of `variant` from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid
/// state of `variant`
pub fn load_state(path: &Path, variant: Variant) -> Result<ShapeState> {
    let bytes = fs::read(path).map_err(|source| SearchError::FileSystem {
        path: path.to_path_buf(),
        operation: "read state",
        source,
    })?;
    deserialize_state(&bytes, variant)
}

//! Generative shape states
//!
//! A `ShapeState` is an immutable snapshot of one point in a variant's search
//! space: its rendered raster, accumulated transform cost, comparator score
//! and the family-specific parameters the raster was drawn from. Transforms
//! never edit a state; they build fresh children from the parent's fields and
//! a newly computed raster, and a transform that would produce a structurally
//! invalid shape yields no child at all.
//!
//! Identity is content-only. Two states are equal, and hash alike, exactly
//! when their rendered rasters are equal, regardless of variant or cost.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use crate::comparator::{IMPOSSIBLE, Score};
use crate::io::configuration::{DEFAULT_MAX_COST, DEFAULT_TRANSFORM_COST};
use crate::io::error::{Result, invalid_data, invalid_parameter};
use crate::raster::grid::Raster;
use crate::shape::chain;
use crate::shape::rectilinear::{
    GrowDirection, apply_rectangle, apply_square, apply_tower, initial_rectangle, initial_square,
    initial_tower,
};
use crate::shape::ring::RingParams;
use crate::shape::scaled::{self, INITIAL_SCALE};
use crate::shape::variant::{Family, Transform, Variant};

/// Family-specific parameters carried alongside the raster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeFields {
    /// Squares and rectangles need nothing beyond the raster
    Plain,
    /// Tower growth axis
    Tower {
        /// Axis locked on the first resize
        direction: GrowDirection,
    },
    /// Ring rendering parameters
    Ring(RingParams),
    /// Chain head position in logical raster coordinates
    Chain {
        /// `[row, col]` of the head cell
        head: [usize; 2],
    },
}

impl ShapeFields {
    const fn matches(&self, family: Family) -> bool {
        matches!(
            (self, family),
            (Self::Plain, Family::Square | Family::Rectangle)
                | (Self::Tower { .. }, Family::Tower)
                | (Self::Ring(_), Family::Ring)
                | (Self::Chain { .. }, Family::Chain)
        )
    }
}

/// Every field of a state, for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeParts {
    /// Variant tag
    pub variant: Variant,
    /// Family-specific parameters
    pub fields: ShapeFields,
    /// Rendered raster
    pub raster: Raster,
    /// Unit-resolution raster of a grid variant
    pub logical: Option<Raster>,
    /// Grid spacing; one for non-grid variants
    pub scale: usize,
    /// Accumulated transform cost
    pub cost: u32,
    /// Cost above which the state is discarded
    pub max_cost: u32,
    /// Comparator distance, if scored
    pub heuristic: Option<u64>,
    /// Best placement `[row, col]` found by the comparator
    pub offset: [usize; 2],
    /// Cost of each transform, aligned with [`Variant::transforms`]
    pub transform_costs: Vec<u32>,
}

/// One node of the search space
#[derive(Debug, Clone)]
pub struct ShapeState {
    variant: Variant,
    fields: ShapeFields,
    raster: Raster,
    logical: Option<Raster>,
    scale: usize,
    cost: u32,
    max_cost: u32,
    heuristic: Option<u64>,
    offset: [usize; 2],
    transform_costs: Vec<u32>,
}

impl ShapeState {
    /// Initial state of a variant
    pub fn new(variant: Variant) -> Self {
        let (logical, fields) = match variant.family() {
            Family::Square => (initial_square(), ShapeFields::Plain),
            Family::Rectangle => (initial_rectangle(), ShapeFields::Plain),
            Family::Tower => (
                initial_tower(),
                ShapeFields::Tower {
                    direction: GrowDirection::Undecided,
                },
            ),
            Family::Ring => {
                let params = RingParams::default();
                (params.render(), ShapeFields::Ring(params))
            }
            Family::Chain => {
                let (raster, head) = chain::initial_chain();
                (raster, ShapeFields::Chain { head })
            }
        };
        Self::assemble(variant, fields, logical, INITIAL_SCALE)
    }

    /// Rebuild a state from persisted parts
    ///
    /// # Errors
    ///
    /// Returns an error if the parts are inconsistent: fields of the wrong
    /// family, a missing or unexpected logical raster, a zero scale, or a
    /// transform cost table of the wrong length
    pub fn from_parts(parts: ShapeParts) -> Result<Self> {
        let variant = parts.variant;
        if !parts.fields.matches(variant.family()) {
            return Err(invalid_data(&format!(
                "fields {:?} do not belong to {variant}",
                parts.fields
            )));
        }
        if variant.is_grid() != parts.logical.is_some() {
            return Err(invalid_data(&format!(
                "{variant} logical raster presence is inconsistent"
            )));
        }
        if parts.scale == 0 {
            return Err(invalid_parameter("scale", &parts.scale, &"must be at least 1"));
        }
        if parts.transform_costs.len() != variant.transforms().len() {
            return Err(invalid_parameter(
                "transform_costs",
                &parts.transform_costs.len(),
                &format!("{variant} has {} transforms", variant.transforms().len()),
            ));
        }

        Ok(Self {
            variant,
            fields: parts.fields,
            raster: parts.raster,
            logical: parts.logical,
            scale: parts.scale,
            cost: parts.cost,
            max_cost: parts.max_cost,
            heuristic: parts.heuristic,
            offset: parts.offset,
            transform_costs: parts.transform_costs,
        })
    }

    /// Split into persisted parts
    pub fn into_parts(self) -> ShapeParts {
        ShapeParts {
            variant: self.variant,
            fields: self.fields,
            raster: self.raster,
            logical: self.logical,
            scale: self.scale,
            cost: self.cost,
            max_cost: self.max_cost,
            heuristic: self.heuristic,
            offset: self.offset,
            transform_costs: self.transform_costs,
        }
    }

    fn assemble(variant: Variant, fields: ShapeFields, logical: Raster, scale: usize) -> Self {
        let (raster, logical) = if variant.is_grid() {
            (scaled::render(&logical, scale), Some(logical))
        } else {
            (logical, None)
        };
        Self {
            variant,
            fields,
            raster,
            logical,
            scale,
            cost: 0,
            max_cost: DEFAULT_MAX_COST,
            heuristic: None,
            offset: [0, 0],
            transform_costs: vec![DEFAULT_TRANSFORM_COST; variant.transforms().len()],
        }
    }

    /// Replace the cost bound
    #[must_use]
    pub const fn with_max_cost(mut self, max_cost: u32) -> Self {
        self.max_cost = max_cost;
        self
    }

    /// Charge every transform the same cost
    #[must_use]
    pub fn with_uniform_transform_cost(mut self, cost: u32) -> Self {
        self.transform_costs.fill(cost);
        self
    }

    /// Charge each transform individually, in [`Variant::transforms`] order
    ///
    /// # Errors
    ///
    /// Returns an error if `costs` does not have one entry per transform
    pub fn with_transform_costs(mut self, costs: &[u32]) -> Result<Self> {
        if costs.len() != self.transform_costs.len() {
            return Err(invalid_parameter(
                "transform_costs",
                &costs.len(),
                &format!(
                    "{} has {} transforms",
                    self.variant,
                    self.transform_costs.len()
                ),
            ));
        }
        self.transform_costs.copy_from_slice(costs);
        Ok(self)
    }

    /// Record a comparator score
    #[must_use]
    pub const fn with_score(mut self, score: Score) -> Self {
        self.heuristic = Some(score.distance);
        self.offset = score.offset;
        self
    }

    /// Variant tag
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Family-specific parameters
    pub const fn fields(&self) -> &ShapeFields {
        &self.fields
    }

    /// Rendered raster used for scoring and identity
    pub const fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Unit-resolution raster; the rendered raster for non-grid variants
    pub fn logical(&self) -> &Raster {
        self.logical.as_ref().unwrap_or(&self.raster)
    }

    /// Grid spacing
    pub const fn scale(&self) -> usize {
        self.scale
    }

    /// Accumulated transform cost
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Cost bound
    pub const fn max_cost(&self) -> u32 {
        self.max_cost
    }

    /// Comparator distance, `None` until scored
    pub const fn heuristic(&self) -> Option<u64> {
        self.heuristic
    }

    /// Best placement `[row, col]` inside the reference
    pub const fn offset(&self) -> [usize; 2] {
        self.offset
    }

    /// Per-transform costs
    pub fn transform_costs(&self) -> &[u32] {
        &self.transform_costs
    }

    /// True once the comparator has reported the shape cannot be placed
    pub fn is_impossible(&self) -> bool {
        self.heuristic == Some(IMPOSSIBLE)
    }

    /// True when accumulated cost exceeds the bound
    pub const fn over_budget(&self) -> bool {
        self.cost > self.max_cost
    }

    /// Frontier priority: cost scaled down so the heuristic dominates
    ///
    /// Unscored states sort last.
    pub fn priority(&self, cost_scale: f64) -> f64 {
        let heuristic = self.heuristic.map_or(f64::INFINITY, |h| h as f64);
        f64::from(self.cost) / cost_scale + heuristic
    }

    /// Cost charged for `transform`
    pub fn transform_cost(&self, transform: Transform) -> u32 {
        self.variant
            .transforms()
            .iter()
            .position(|&t| t == transform)
            .and_then(|index| self.transform_costs.get(index).copied())
            .unwrap_or(DEFAULT_TRANSFORM_COST)
    }

    /// All children across every transform of the variant
    pub fn successors(&self) -> Vec<Self> {
        self.variant
            .transforms()
            .iter()
            .flat_map(|&transform| self.apply(transform))
            .collect()
    }

    /// Children produced by one transform
    ///
    /// Empty when the transform is not part of the variant or the result would
    /// be structurally invalid. Endpoint transforms on chains may produce
    /// several children.
    pub fn apply(&self, transform: Transform) -> Vec<Self> {
        if !self.variant.transforms().contains(&transform) {
            return Vec::new();
        }
        if self.variant.is_grid() {
            if let Some(scale) = scaled::rescale(transform, self.scale) {
                return vec![self.child(transform, self.logical().clone(), self.fields.clone(), scale)];
            }
        }

        let logical = self.logical();
        let scale = self.scale;
        match (self.variant.family(), &self.fields) {
            (Family::Square, _) => apply_square(transform, logical)
                .map(|raster| self.child(transform, raster, ShapeFields::Plain, scale))
                .into_iter()
                .collect(),
            (Family::Rectangle, _) => apply_rectangle(transform, logical)
                .map(|raster| self.child(transform, raster, ShapeFields::Plain, scale))
                .into_iter()
                .collect(),
            (Family::Tower, &ShapeFields::Tower { direction }) => {
                apply_tower(transform, logical, direction)
                    .map(|(raster, direction)| {
                        self.child(transform, raster, ShapeFields::Tower { direction }, scale)
                    })
                    .into_iter()
                    .collect()
            }
            (Family::Ring, ShapeFields::Ring(params)) => params
                .apply(transform)
                .map(|next| self.child(transform, next.render(), ShapeFields::Ring(next), scale))
                .into_iter()
                .collect(),
            (Family::Chain, &ShapeFields::Chain { head }) => {
                let children = match transform {
                    Transform::ExtendEndpoints => chain::extend_endpoints(logical),
                    Transform::TrimEndpoints => chain::trim_endpoints(logical, head),
                    _ => Vec::new(),
                };
                children
                    .into_iter()
                    .map(|(raster, head)| {
                        self.child(transform, raster, ShapeFields::Chain { head }, scale)
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    fn child(&self, transform: Transform, logical: Raster, fields: ShapeFields, scale: usize) -> Self {
        let mut child = Self::assemble(self.variant, fields, logical, scale);
        child.cost = self.cost.saturating_add(self.transform_cost(transform));
        child.max_cost = self.max_cost;
        child.transform_costs.clone_from(&self.transform_costs);
        child
    }

    /// Human-readable summary
    pub fn describe(&self) -> String {
        let mut text = match &self.fields {
            ShapeFields::Ring(params) => format!(
                "{} of radius {} with {} items at rotation {}",
                self.variant, params.radius, params.items, params.rotation
            ),
            ShapeFields::Tower { direction } => {
                format!("{} growing {direction:?}", self.variant)
            }
            ShapeFields::Chain { head } => {
                format!("{} with head at ({}, {})", self.variant, head[0], head[1])
            }
            ShapeFields::Plain => self.variant.to_string(),
        };
        let _ = write!(
            text,
            "; {}x{} at ({}, {})",
            self.raster.rows(),
            self.raster.cols(),
            self.offset[0],
            self.offset[1]
        );
        if self.variant.is_grid() {
            let _ = write!(text, "; scale {}", self.scale);
        }
        let _ = write!(text, "; cost {}", self.cost);
        match self.heuristic {
            Some(IMPOSSIBLE) => text.push_str("; cannot be placed"),
            Some(distance) => {
                let _ = write!(text, "; distance {distance}");
            }
            None => {}
        }
        text
    }
}

impl PartialEq for ShapeState {
    fn eq(&self, other: &Self) -> bool {
        self.raster == other.raster
    }
}

impl Eq for ShapeState {}

impl Hash for ShapeState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raster.hash(state);
    }
}

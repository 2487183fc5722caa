//! Variant tags and the transforms each variant exposes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::io::error::{Result, SearchError};

/// Generative shape family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Filled square grown from the bottom-right corner
    Square,
    /// Filled rectangle with independent axes
    Rectangle,
    /// Rectangle that commits to one growth axis
    Tower,
    /// Evenly spaced points on a circle
    Ring,
    /// Four-connected path
    Chain,
}

/// Named variant: a family, optionally wrapped in grid scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// `SquareN`
    #[serde(rename = "SquareN")]
    Square,
    /// `SquareGridN`
    #[serde(rename = "SquareGridN")]
    SquareGrid,
    /// `RectangleN`
    #[serde(rename = "RectangleN")]
    Rectangle,
    /// `RectangleGridN`
    #[serde(rename = "RectangleGridN")]
    RectangleGrid,
    /// `TowerN`
    #[serde(rename = "TowerN")]
    Tower,
    /// `TowerGridN`
    #[serde(rename = "TowerGridN")]
    TowerGrid,
    /// `RingN`
    #[serde(rename = "RingN")]
    Ring,
    /// `RingGridN`
    #[serde(rename = "RingGridN")]
    RingGrid,
    /// `ChainN`
    #[serde(rename = "ChainN")]
    Chain,
    /// `ChainGridN`
    #[serde(rename = "ChainGridN")]
    ChainGrid,
}

/// A single structural edit applied to a parent state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Grow a square by one row and one column
    Expand,
    /// Shrink a square by one row and one column
    Contract,
    /// Add a column
    ExpandX,
    /// Add a row
    ExpandY,
    /// Remove a column
    ContractX,
    /// Remove a row
    ContractY,
    /// One more ring item
    AddItem,
    /// One fewer ring item
    RemoveItem,
    /// Twice as many ring items
    DoubleItems,
    /// Half as many ring items
    HalveItems,
    /// Ring radius plus one
    ExpandRadius,
    /// Ring radius minus one
    ContractRadius,
    /// Extend every path endpoint in each free direction
    ExtendEndpoints,
    /// Remove each path endpoint in turn
    TrimEndpoints,
    /// Increase the grid spacing
    ScaleUp,
    /// Decrease the grid spacing
    ScaleDown,
}

const SQUARE: &[Transform] = &[Transform::Expand, Transform::Contract];
const RECTANGLE: &[Transform] = &[
    Transform::ExpandX,
    Transform::ExpandY,
    Transform::ContractX,
    Transform::ContractY,
];
const RING: &[Transform] = &[
    Transform::AddItem,
    Transform::RemoveItem,
    Transform::ExpandRadius,
    Transform::ContractRadius,
    Transform::DoubleItems,
    Transform::HalveItems,
];
const CHAIN: &[Transform] = &[Transform::ExtendEndpoints, Transform::TrimEndpoints];

const SQUARE_GRID: &[Transform] = &[
    Transform::Expand,
    Transform::Contract,
    Transform::ScaleUp,
    Transform::ScaleDown,
];
const RECTANGLE_GRID: &[Transform] = &[
    Transform::ExpandX,
    Transform::ExpandY,
    Transform::ContractX,
    Transform::ContractY,
    Transform::ScaleUp,
    Transform::ScaleDown,
];
const RING_GRID: &[Transform] = &[
    Transform::AddItem,
    Transform::RemoveItem,
    Transform::ExpandRadius,
    Transform::ContractRadius,
    Transform::DoubleItems,
    Transform::HalveItems,
    Transform::ScaleUp,
    Transform::ScaleDown,
];
const CHAIN_GRID: &[Transform] = &[
    Transform::ExtendEndpoints,
    Transform::TrimEndpoints,
    Transform::ScaleUp,
    Transform::ScaleDown,
];

impl Variant {
    /// Every variant in catalogue order
    pub const ALL: [Self; 10] = [
        Self::Square,
        Self::SquareGrid,
        Self::Rectangle,
        Self::RectangleGrid,
        Self::Tower,
        Self::TowerGrid,
        Self::Ring,
        Self::RingGrid,
        Self::Chain,
        Self::ChainGrid,
    ];

    /// Underlying shape family
    pub const fn family(self) -> Family {
        match self {
            Self::Square | Self::SquareGrid => Family::Square,
            Self::Rectangle | Self::RectangleGrid => Family::Rectangle,
            Self::Tower | Self::TowerGrid => Family::Tower,
            Self::Ring | Self::RingGrid => Family::Ring,
            Self::Chain | Self::ChainGrid => Family::Chain,
        }
    }

    /// True for the grid-scaled wrappers
    pub const fn is_grid(self) -> bool {
        matches!(
            self,
            Self::SquareGrid
                | Self::RectangleGrid
                | Self::TowerGrid
                | Self::RingGrid
                | Self::ChainGrid
        )
    }

    /// Transforms in the order children are generated
    pub const fn transforms(self) -> &'static [Transform] {
        match self {
            Self::Square => SQUARE,
            Self::SquareGrid => SQUARE_GRID,
            Self::Rectangle | Self::Tower => RECTANGLE,
            Self::RectangleGrid | Self::TowerGrid => RECTANGLE_GRID,
            Self::Ring => RING,
            Self::RingGrid => RING_GRID,
            Self::Chain => CHAIN,
            Self::ChainGrid => CHAIN_GRID,
        }
    }

    /// Canonical tag, e.g. `RingGridN`
    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "SquareN",
            Self::SquareGrid => "SquareGridN",
            Self::Rectangle => "RectangleN",
            Self::RectangleGrid => "RectangleGridN",
            Self::Tower => "TowerN",
            Self::TowerGrid => "TowerGridN",
            Self::Ring => "RingN",
            Self::RingGrid => "RingGridN",
            Self::Chain => "ChainN",
            Self::ChainGrid => "ChainGridN",
        }
    }

    /// Parse a comma-separated list of tags, ignoring blank entries
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unrecognised tag, or if the list
    /// contains no tags at all
    pub fn parse_list(list: &str) -> Result<Vec<Self>> {
        let variants = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Self>>>()?;
        if variants.is_empty() {
            return Err(SearchError::UnknownVariant {
                name: list.to_string(),
            });
        }
        Ok(variants)
    }
}

impl FromStr for Variant {
    type Err = SearchError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| SearchError::UnknownVariant {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Ring generator: evenly spaced points on a circle

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::io::configuration::FOREGROUND;
use crate::raster::grid::Raster;
use crate::shape::variant::Transform;

/// Parameters a ring raster is rendered from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingParams {
    /// Radius in cells; the canvas is `2 * radius - 1` square
    pub radius: usize,
    /// Number of points placed around the circle
    pub items: usize,
    /// Angle of the first point in radians
    pub rotation: f64,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            radius: 3,
            items: 3,
            rotation: 0.0,
        }
    }
}

impl RingParams {
    /// Draw the ring from scratch
    ///
    /// Points sit on a circle of radius `radius - 0.5` around the centre cell.
    /// Offsets are truncated toward zero, which keeps every point inside the
    /// canvas.
    pub fn render(&self) -> Raster {
        let side = (2 * self.radius).saturating_sub(1);
        let mut raster = Raster::new(side, side);
        if self.radius == 0 || self.items == 0 {
            return raster;
        }

        let centre = (self.radius - 1) as f64;
        let reach = self.radius as f64 - 0.5;
        let step = TAU / self.items as f64;
        let mut angle = self.rotation;
        for _ in 0..self.items {
            let col = (angle.cos() * reach).trunc() + centre;
            let row = (angle.sin() * reach).trunc() + centre;
            if row >= 0.0 && col >= 0.0 {
                raster.set(row as usize, col as usize, FOREGROUND);
            }
            angle = (angle + step) % TAU;
        }
        raster
    }

    /// Apply a ring transform; structurally invalid results are `None`
    pub fn apply(&self, transform: Transform) -> Option<Self> {
        let mut next = *self;
        match transform {
            Transform::AddItem => next.items += 1,
            Transform::RemoveItem => next.items = self.items.checked_sub(1).filter(|&n| n > 0)?,
            Transform::DoubleItems => next.items *= 2,
            Transform::HalveItems => {
                if self.items % 2 != 0 {
                    return None;
                }
                next.items /= 2;
            }
            Transform::ExpandRadius => next.radius += 1,
            Transform::ContractRadius => {
                next.radius = self.radius.checked_sub(1).filter(|&n| n > 0)?;
            }
            _ => return None,
        }
        Some(next)
    }
}

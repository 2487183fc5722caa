//! Point-sampled upscaling

use crate::raster::grid::Raster;

impl Raster {
    /// Spread cells out on a `scale`-spaced lattice
    ///
    /// The result is `rows * scale` by `cols * scale`. Cell (r, c) is copied to
    /// (r * scale, c * scale) and every other cell is background, so each
    /// logical cell becomes a single point rather than a filled block. A scale
    /// of zero yields a 0x0 raster.
    #[must_use]
    pub fn scale_grid(&self, scale: usize) -> Self {
        let (rows, cols) = self.dim();
        let mut out = Self::new(rows * scale, cols * scale);
        if scale == 0 {
            return out;
        }
        for ((row, col), &value) in self.cells().indexed_iter() {
            out.set(row * scale, col * scale, value);
        }
        out
    }
}

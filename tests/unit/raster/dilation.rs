//! Tests for four- and eight-connected dilation

#[cfg(test)]
mod tests {
    use shapesearch::raster::{Connectivity, Raster};

    fn single(rows: usize, cols: usize, row: usize, col: usize) -> Raster {
        let mut r = Raster::new(rows, cols);
        r.set(row, col, 255);
        r
    }

    // Tests the cross and square footprints of a single dilated point
    // Verified by swapping the neighbour tables
    #[test]
    fn test_single_point_footprints() {
        let point = single(5, 5, 2, 2);
        assert_eq!(point.dilate(Connectivity::Four).foreground_count(), 5);
        assert_eq!(point.dilate(Connectivity::Eight).foreground_count(), 9);
        assert!(!point.dilate(Connectivity::Four).is_foreground(1, 1));
        assert!(point.dilate(Connectivity::Eight).is_foreground(1, 1));
    }

    // Tests that a corner point does not wrap or fail at the border
    // Verified by removing the bounds check on neighbour offsets
    #[test]
    fn test_corner_point() {
        let dilated = single(3, 3, 0, 0).dilate(Connectivity::Eight);
        assert_eq!(dilated.foreground_count(), 4);
        assert!(!dilated.is_foreground(2, 2));
    }

    // Tests that foreground values are normalised
    // Verified by copying the source value through
    #[test]
    fn test_values_normalised() {
        let mut r = Raster::new(1, 3);
        r.set(0, 1, 7);
        let dilated = r.dilate(Connectivity::Four);
        assert_eq!(dilated.to_flat(), vec![255, 255, 255]);
    }

    // Tests that the growing form keeps border pixels and shifts by one
    // Verified by dilating before padding
    #[test]
    fn test_dilate_grow() {
        let corner = single(2, 2, 0, 0);
        let grown = corner.dilate_grow(Connectivity::Eight);
        assert_eq!(grown.dim(), (4, 4));
        assert!(grown.is_foreground(1, 1));
        assert!(grown.is_foreground(0, 0));
        assert_eq!(grown.foreground_count(), 9);
    }
}

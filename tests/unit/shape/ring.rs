//! Tests for ring rendering and parameter transforms

#[cfg(test)]
mod tests {
    use shapesearch::shape::Transform;
    use shapesearch::shape::ring::RingParams;

    // Tests the default ring: three points on a 5x5 canvas
    // Verified by rounding instead of truncating offsets
    #[test]
    fn test_default_render() {
        let ring = RingParams::default().render();
        assert_eq!(ring.dim(), (5, 5));
        assert_eq!(ring.foreground_count(), 3);
        assert!(ring.is_foreground(2, 4));
        assert!(ring.is_foreground(4, 1));
        assert!(ring.is_foreground(0, 1));
    }

    // Tests a rotated ring lands on truncated offsets
    // Verified by rounding instead of truncating offsets
    #[test]
    fn test_rotated_render() {
        let ring = RingParams {
            radius: 3,
            items: 4,
            rotation: 0.75,
        }
        .render();
        assert_eq!(ring.dim(), (5, 5));
        assert_eq!(ring.foreground_count(), 4);
        for (row, col) in [(3, 3), (3, 1), (1, 1), (1, 3)] {
            assert!(ring.is_foreground(row, col), "({row}, {col})");
        }
        assert!(!ring.is_foreground(4, 4));
        assert!(!ring.is_foreground(0, 0));
    }

    // Tests canvas size tracking the radius
    // Verified by using the radius as the side length
    #[test]
    fn test_canvas_follows_radius() {
        let params = RingParams {
            radius: 6,
            items: 4,
            rotation: 0.0,
        };
        assert_eq!(params.render().dim(), (11, 11));
        assert_eq!(params.render().foreground_count(), 4);
    }

    // Tests the invalid boundaries of each transform
    // Verified by allowing zero items
    #[test]
    fn test_transform_boundaries() {
        let one = RingParams {
            radius: 1,
            items: 1,
            rotation: 0.0,
        };
        assert!(one.apply(Transform::RemoveItem).is_none());
        assert!(one.apply(Transform::HalveItems).is_none());
        assert!(one.apply(Transform::ContractRadius).is_none());
        assert_eq!(one.apply(Transform::DoubleItems).map(|p| p.items), Some(2));
        assert_eq!(one.apply(Transform::ExpandRadius).map(|p| p.radius), Some(2));
        assert!(one.apply(Transform::Expand).is_none());
    }

    // Tests add then remove restores the item count
    // Verified by removing two items
    #[test]
    fn test_add_remove_round_trip() {
        let start = RingParams::default();
        let back = start
            .apply(Transform::AddItem)
            .and_then(|p| p.apply(Transform::RemoveItem))
            .expect("both transforms apply");
        assert_eq!(back.items, start.items);
    }
}

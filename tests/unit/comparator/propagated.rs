//! Tests for the multi-resolution comparator

#[cfg(test)]
mod tests {
    use shapesearch::SearchError;
    use shapesearch::comparator::{BruteComparator, PropagatedComparator, RasterComparator};
    use shapesearch::raster::Raster;

    fn centred_block() -> Raster {
        let mut reference = Raster::new(5, 5);
        for row in 1..4 {
            for col in 1..4 {
                reference.set(row, col, 255);
            }
        }
        reference
    }

    // Tests that a single level reproduces the exact distance everywhere
    // Verified by offsetting the level window by one cell
    #[test]
    fn test_single_level_matches_brute() {
        let brute = BruteComparator::new(centred_block());
        let propagated = PropagatedComparator::new(centred_block(), 1).expect("depth 1");

        let candidates = [
            Raster::filled(3, 3, 255),
            Raster::from_rows(&[vec![255, 0], vec![255, 255]]).expect("rectangular"),
            Raster::new(1, 4),
        ];
        for candidate in &candidates {
            assert_eq!(propagated.score_all(candidate), brute.score_all(candidate));
            assert_eq!(propagated.score(candidate), brute.score(candidate));
        }
    }

    // Tests that the weighted total is the weighted sum of the level scores
    // Verified by overwriting the total with the last level
    #[test]
    fn test_weighted_levels() {
        let propagated = PropagatedComparator::new(centred_block(), 3).expect("depth 3");
        let candidate = Raster::filled(2, 2, 255);

        let levels = propagated
            .level_scores(&candidate, [0, 0])
            .expect("valid placement");
        assert_eq!(levels.len(), 3);

        let pyramid = propagated.candidate_pyramid(&candidate);
        let expected: u64 = levels
            .iter()
            .enumerate()
            .map(|(level, &score)| PropagatedComparator::weight(level) * score)
            .sum();
        assert_eq!(propagated.score_at(&pyramid, candidate.dim(), [0, 0]), expected);
        assert_eq!(PropagatedComparator::weight(0), 1);
        assert_eq!(PropagatedComparator::weight(2), 3);
    }

    // Tests that an aligned candidate scores zero at every level
    // Verified by growing the window in one direction only
    #[test]
    fn test_aligned_scores_zero() {
        let propagated = PropagatedComparator::new(centred_block(), 4).expect("depth 4");
        let block = Raster::filled(3, 3, 255);
        assert_eq!(
            propagated.level_scores(&block, [1, 1]),
            Some(vec![0, 0, 0, 0])
        );
        assert_eq!(propagated.score(&block).offset, [1, 1]);
        assert_eq!(propagated.level_scores(&block, [3, 0]), None);
    }

    // Tests construction errors
    // Verified by building an empty pyramid
    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            PropagatedComparator::new(centred_block(), 0),
            Err(SearchError::InvalidParameter { .. })
        ));
        assert!(matches!(
            PropagatedComparator::with_base(centred_block(), Raster::new(5, 4), 2),
            Err(SearchError::DimensionMismatch { .. })
        ));
    }
}

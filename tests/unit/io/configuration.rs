//! Tests for search constants

#[cfg(test)]
mod tests {
    use shapesearch::io::configuration::{
        BACKGROUND, COST_SCALE, DEFAULT_MAX_COST, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_ROUNDS,
        DEFAULT_TRANSFORM_COST, FOREGROUND, OUTPUT_SUFFIX, PROGRESS_BAR_WIDTH, PROPAGATION_DEPTH,
        SHORTLIST_SIZE,
    };

    // Tests cell values fit in an 8-bit channel and differ
    // Verified by setting foreground to background
    #[test]
    fn test_cell_values() {
        assert_eq!(BACKGROUND, 0);
        assert_eq!(FOREGROUND, 255);
    }

    // Tests that a single transform's cost stays below one distance unit
    // Verified by setting the cost scale to one
    #[test]
    fn test_cost_is_tie_breaker() {
        assert!(f64::from(DEFAULT_TRANSFORM_COST) / COST_SCALE < 1.0);
        assert_eq!(DEFAULT_MAX_COST, 100_000);
    }

    // Tests comparator defaults
    // Verified by changing depth and shortlist values
    #[test]
    fn test_comparator_defaults() {
        assert_eq!(PROPAGATION_DEPTH, 5);
        assert_eq!(SHORTLIST_SIZE, 50);
    }

    // Tests driver defaults
    // Verified by changing iteration and round limits
    #[test]
    fn test_driver_defaults() {
        assert_eq!(DEFAULT_MAX_ITERATIONS, 1000);
        assert_eq!(DEFAULT_MAX_ROUNDS, 8);
        assert_eq!(OUTPUT_SUFFIX, "_result");
        assert_eq!(PROGRESS_BAR_WIDTH, 40);
    }
}

//! Tests for round progress tracking

#[cfg(test)]
mod tests {
    use shapesearch::io::progress::SearchProgress;

    // Tests counters across a bounded round
    // Verified by not resetting the position between rounds
    #[test]
    fn test_bounded_round() {
        let mut progress = SearchProgress::hidden();
        progress.start_round(0, Some(10));
        progress.record_node();
        progress.record_node();
        progress.record_best(7);
        assert_eq!(progress.position(), 2);
        assert_eq!(progress.best(), Some(7));
        progress.finish();

        progress.start_round(1, None);
        assert_eq!(progress.round(), 1);
        assert_eq!(progress.position(), 0);
        assert_eq!(progress.best(), None);
        progress.record_node();
        assert_eq!(progress.position(), 1);
        progress.clear();
    }

    // Tests default trait implementation
    // Verified by creating different initial states
    #[test]
    fn test_default() {
        let progress = SearchProgress::default();
        assert_eq!(progress.round(), 0);
        assert_eq!(progress.best(), None);
        progress.clear();
    }
}

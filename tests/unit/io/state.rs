//! Tests for JSON state persistence

#[cfg(test)]
mod tests {
    use shapesearch::SearchError;
    use shapesearch::comparator::Score;
    use shapesearch::io::state::{
        FlatRaster, deserialize_state, load_state, save_state, serialize_state,
    };
    use shapesearch::raster::Raster;
    use shapesearch::shape::ring::RingParams;
    use shapesearch::shape::{ShapeFields, ShapeParts, ShapeState, Transform, Variant};
    use tempfile::TempDir;

    fn evolved(variant: Variant) -> ShapeState {
        let state = ShapeState::new(variant).with_max_cost(40);
        let child = state
            .successors()
            .into_iter()
            .next()
            .expect("initial states have children");
        child.with_score(Score {
            distance: 12,
            offset: [3, 1],
        })
    }

    // Tests that every field survives a round trip
    // Verified by dropping the logical raster from the record
    #[test]
    fn test_round_trip_every_field() {
        for variant in [Variant::RingGrid, Variant::Tower, Variant::Chain] {
            let state = evolved(variant);
            let bytes = serialize_state(&state).expect("encodes");
            let back = deserialize_state(&bytes, variant).expect("decodes");
            assert_eq!(back.into_parts(), state.into_parts(), "{variant}");
        }
    }

    // Tests that the record names its variant and family fields
    // Verified by serializing the enum index instead of the tag
    #[test]
    fn test_record_layout() {
        let bytes = serialize_state(&ShapeState::new(Variant::Ring)).expect("encodes");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");
        assert_eq!(json["variant"], "RingN");
        assert_eq!(json["fields"]["kind"], "ring");
        assert_eq!(json["fields"]["radius"], 3);
        assert_eq!(json["raster"]["width"], 5);
        assert!(json.get("logical").is_none());
    }

    // Tests that a record cannot be loaded as another variant
    // Verified by trusting the requested variant
    #[test]
    fn test_variant_mismatch() {
        let bytes = serialize_state(&ShapeState::new(Variant::Square)).expect("encodes");
        assert!(matches!(
            deserialize_state(&bytes, Variant::Rectangle),
            Err(SearchError::VariantMismatch { .. })
        ));
    }

    // Tests corrupt input
    // Verified by defaulting missing fields
    #[test]
    fn test_corrupt_records() {
        assert!(matches!(
            deserialize_state(b"{", Variant::Square),
            Err(SearchError::Serialization { .. })
        ));

        let flat = FlatRaster {
            width: 2,
            height: 2,
            cells: vec![255; 3],
        };
        assert!(Raster::try_from(flat).is_err());
    }

    // Tests records whose declared dimensions overflow
    // Verified by computing the expected cell count unchecked
    #[test]
    fn test_oversized_record_is_rejected() {
        let bytes = serialize_state(&ShapeState::new(Variant::Square)).expect("encodes");
        let mut json: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");
        json["raster"] = serde_json::json!({
            "width": 4_294_967_296_u64,
            "height": 4_294_967_296_u64,
            "cells": [1],
        });
        let corrupt = serde_json::to_vec(&json).expect("encodes");
        assert!(matches!(
            deserialize_state(&corrupt, Variant::Square),
            Err(SearchError::InvalidSourceData { .. })
        ));
    }

    // Tests that a rotated ring and its children keep their rotation
    // Verified by omitting the rotation from the ring fields
    #[test]
    fn test_rotated_ring_round_trip() {
        let params = RingParams {
            radius: 3,
            items: 4,
            rotation: 0.75,
        };
        let ring = ShapeState::from_parts(ShapeParts {
            variant: Variant::Ring,
            fields: ShapeFields::Ring(params),
            raster: params.render(),
            logical: None,
            scale: 1,
            cost: 3,
            max_cost: 40,
            heuristic: Some(7),
            offset: [2, 1],
            transform_costs: vec![1; Variant::Ring.transforms().len()],
        })
        .expect("consistent parts");

        let children = ring.apply(Transform::AddItem);
        let mut states = vec![ring];
        states.extend(children);
        for state in states {
            let bytes = serialize_state(&state).expect("encodes");
            let back = deserialize_state(&bytes, Variant::Ring).expect("decodes");
            assert!(matches!(
                back.fields(),
                ShapeFields::Ring(RingParams { rotation, .. }) if (*rotation - 0.75).abs() < f64::EPSILON
            ));
            assert_eq!(back.into_parts(), state.into_parts());
        }
    }

    // Tests file persistence
    // Verified by writing compact output that drops fields
    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("state.json");
        let state = evolved(Variant::SquareGrid);
        save_state(&state, &path).expect("written");

        let loaded = load_state(&path, Variant::SquareGrid).expect("read");
        assert_eq!(loaded.scale(), state.scale());
        assert_eq!(loaded, state);
        assert_eq!(loaded.apply(Transform::ScaleUp).len(), 1);

        assert!(matches!(
            load_state(&temp_dir.path().join("absent.json"), Variant::Square),
            Err(SearchError::FileSystem { .. })
        ));
    }
}

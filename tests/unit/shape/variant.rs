//! Tests for variant tag parsing and the per-variant transform lists

#[cfg(test)]
mod tests {
    use shapesearch::SearchError;
    use shapesearch::shape::{Family, Transform, Variant};

    // Tests that every tag parses back to its own variant, ignoring case
    // Verified by dropping a variant from the catalogue
    #[test]
    fn test_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(variant.name().parse::<Variant>().ok(), Some(variant));
            assert_eq!(
                variant.name().to_lowercase().parse::<Variant>().ok(),
                Some(variant)
            );
            assert_eq!(variant.to_string(), variant.name());
        }
    }

    // Tests list parsing, blanks and unknown tags
    // Verified by silently skipping unknown tags
    #[test]
    fn test_parse_list() {
        let parsed = Variant::parse_list("SquareN, RingGridN,,ChainN").expect("known tags");
        assert_eq!(parsed, vec![Variant::Square, Variant::RingGrid, Variant::Chain]);

        assert!(matches!(
            Variant::parse_list("SquareN,Hexagon"),
            Err(SearchError::UnknownVariant { name }) if name == "Hexagon"
        ));
        assert!(Variant::parse_list(" , ").is_err());
    }

    // Tests that grid wrappers add exactly the scaling transforms
    // Verified by giving grid variants the base transform list
    #[test]
    fn test_grid_wrappers_add_scaling() {
        for variant in Variant::ALL {
            let has_scaling = variant.transforms().contains(&Transform::ScaleUp)
                && variant.transforms().contains(&Transform::ScaleDown);
            assert_eq!(has_scaling, variant.is_grid(), "{variant}");
        }
        assert_eq!(Variant::RingGrid.transforms().len(), Variant::Ring.transforms().len() + 2);
    }

    // Tests family mapping for plain and grid variants
    // Verified by mapping towers to rectangles
    #[test]
    fn test_family() {
        assert_eq!(Variant::Tower.family(), Family::Tower);
        assert_eq!(Variant::TowerGrid.family(), Family::Tower);
        assert_eq!(Variant::ChainGrid.family(), Family::Chain);
        assert!(!Variant::Square.is_grid());
    }
}

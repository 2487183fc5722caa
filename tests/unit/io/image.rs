//! Tests for PNG and plain PNM raster codecs

#[cfg(test)]
mod tests {
    use shapesearch::SearchError;
    use shapesearch::io::image::{RasterFormat, encode_pnm, load_raster, parse_pnm, save_raster};
    use shapesearch::raster::Raster;
    use std::path::Path;
    use tempfile::TempDir;

    fn sample() -> Raster {
        Raster::from_rows(&[vec![255, 0, 128], vec![0, 255, 0]]).expect("rectangular")
    }

    // Tests format detection from extensions
    // Verified by matching extensions case-sensitively
    #[test]
    fn test_format_from_path() {
        assert_eq!(RasterFormat::from_path(Path::new("a.PNG")), Some(RasterFormat::Png));
        assert_eq!(RasterFormat::from_path(Path::new("dir/b.pbm")), Some(RasterFormat::Pbm));
        assert_eq!(RasterFormat::from_path(Path::new("c.pgm")), Some(RasterFormat::Pgm));
        assert_eq!(RasterFormat::from_path(Path::new("d.bmp")), None);
        assert_eq!(RasterFormat::from_path(Path::new("noext")), None);
        assert_eq!(RasterFormat::Pgm.extension(), "pgm");
    }

    // Tests bitmap parsing with comments and packed digits
    // Verified by treating 1 as background
    #[test]
    fn test_parse_bitmap() {
        let raster = parse_pnm("P1\n# a comment\n3 2\n1 0 1\n010 # trailing\n").expect("valid");
        assert_eq!(raster.dim(), (2, 3));
        assert_eq!(raster.to_flat(), vec![255, 0, 255, 0, 255, 0]);
    }

    // Tests graymap values are rescaled to 0..=255
    // Verified by ignoring the declared maximum
    #[test]
    fn test_parse_graymap() {
        let raster = parse_pnm("P2 2 1 15\n15 0").expect("valid");
        assert_eq!(raster.to_flat(), vec![255, 0]);
    }

    // Tests malformed documents
    // Verified by padding short bodies with background
    #[test]
    fn test_parse_errors() {
        for text in ["", "P6 1 1 255 0", "P1 2 2 1 0 1", "P1 x 1 1", "P1 1 1 2", "P2 1 1 255 z"] {
            assert!(
                matches!(parse_pnm(text), Err(SearchError::InvalidSourceData { .. })),
                "{text:?}"
            );
        }
    }

    // Tests headers whose dimensions or maximum cannot be trusted
    // Verified by multiplying the header dimensions unchecked
    #[test]
    fn test_parse_rejects_oversized_headers() {
        for text in [
            "P1\n4294967296 4294967296\n1\n",
            "P1 4294967296 1 1",
            "P2\n1 1\n18446744073709551615\n18446744073709551615\n",
            "P2 1 1 65536 0",
            "P2 1 1 0 0",
            "P1 1 1 1 1",
        ] {
            assert!(
                matches!(parse_pnm(text), Err(SearchError::InvalidSourceData { .. })),
                "{text:?}"
            );
        }

        let widest = parse_pnm("P2 2 1 65535 65535 0").expect("largest maximum is valid");
        assert_eq!(widest.to_flat(), vec![255, 0]);
    }

    // Tests the text encodings
    // Verified by writing width and height in the wrong order
    #[test]
    fn test_encode() {
        let raster = sample();
        assert_eq!(
            encode_pnm(&raster, RasterFormat::Pbm),
            "P1\n3 2\n1 0 1\n0 1 0\n"
        );
        assert_eq!(
            encode_pnm(&raster, RasterFormat::Pgm),
            "P2\n3 2\n255\n255 0 128\n0 255 0\n"
        );
        assert_eq!(parse_pnm(&encode_pnm(&raster, RasterFormat::Pgm)).ok(), Some(raster));
    }

    // Tests writing and reading each format, creating directories
    // Verified by swapping rows and columns when saving PNGs
    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("temp dir");
        let raster = sample();

        let png = temp_dir.path().join("nested/out.png");
        save_raster(&raster, &png, RasterFormat::Png).expect("png written");
        assert_eq!(load_raster(&png).expect("png read"), raster);

        let pgm = temp_dir.path().join("out.pgm");
        save_raster(&raster, &pgm, RasterFormat::Pgm).expect("pgm written");
        assert_eq!(load_raster(&pgm).expect("pgm read"), raster);

        let pbm = temp_dir.path().join("out.pbm");
        save_raster(&raster, &pbm, RasterFormat::Pbm).expect("pbm written");
        let bitmap = load_raster(&pbm).expect("pbm read");
        assert_eq!(bitmap.to_flat(), vec![255, 0, 255, 0, 255, 0]);
    }

    // Tests that BMP inputs load as luma
    // Verified by building image without the bmp decoder
    #[test]
    fn test_load_bmp() {
        let temp_dir = TempDir::new().expect("temp dir");
        let picture = image::RgbImage::from_fn(3, 2, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([255, 255, 255])
            } else {
                image::Rgb([0, 0, 0])
            }
        });
        let path = temp_dir.path().join("in.bmp");
        picture.save(&path).expect("written");
        let raster = load_raster(&path).expect("decoded");
        assert_eq!(raster.to_flat(), vec![255, 0, 255, 0, 255, 0]);
    }

    // Tests missing files report the path
    // Verified by discarding the path from the error
    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let missing = temp_dir.path().join("missing.pbm");
        assert!(matches!(
            load_raster(&missing),
            Err(SearchError::FileSystem { path, .. }) if path == missing
        ));
        assert!(matches!(
            load_raster(&temp_dir.path().join("missing.png")),
            Err(SearchError::ImageLoad { .. })
        ));
    }
}

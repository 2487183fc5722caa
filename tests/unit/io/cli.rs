//! Tests for command-line parsing and the command runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use shapesearch::SearchError;
    use shapesearch::comparator::ComparatorKind;
    use shapesearch::io::cli::{Cli, Command, Mode, Runner, SearchArgs, output_path};
    use shapesearch::io::configuration::{
        DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_ROUNDS, PROPAGATION_DEPTH,
    };
    use shapesearch::io::image::{RasterFormat, load_raster, save_raster};
    use shapesearch::io::state::load_state;
    use shapesearch::raster::Raster;
    use shapesearch::shape::Variant;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn centred_block() -> Raster {
        let mut reference = Raster::new(5, 5);
        for row in 1..4 {
            for col in 1..4 {
                reference.set(row, col, 255);
            }
        }
        reference
    }

    fn search_args(cli: Cli) -> Option<SearchArgs> {
        match cli.command {
            Command::Search(args) => Some(args),
            _ => None,
        }
    }

    fn path_arg(path: &Path) -> &str {
        path.to_str().expect("temp paths are UTF-8")
    }

    fn write_reference(dir: &Path) -> PathBuf {
        let path = dir.join("reference.pbm");
        save_raster(&centred_block(), &path, RasterFormat::Pbm).expect("reference written");
        path
    }

    // Tests search parsing with only the reference argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_parse_search_defaults() {
        let cli = Cli::parse_from(["shapesearch", "search", "ref.png"]);
        assert!(!cli.quiet);
        let args = search_args(cli).expect("search command");
        assert_eq!(args.reference, PathBuf::from("ref.png"));
        assert_eq!(args.variants, "SquareN");
        assert_eq!(args.iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(args.comparator, ComparatorKind::Cached);
        assert_eq!(args.depth, PROPAGATION_DEPTH);
        assert_eq!(args.mode, Mode::Single);
        assert_eq!(args.rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(args.target, None);
        assert_eq!(args.output_path(), PathBuf::from("ref_result.png"));
        assert_eq!(args.search_config().lifetime, Some(DEFAULT_MAX_ITERATIONS));
    }

    // Tests search parsing with every option
    // Verified by mapping short flags to the wrong fields
    #[test]
    fn test_parse_search_all_args() {
        let cli = Cli::parse_from([
            "shapesearch",
            "search",
            "ref.pbm",
            "-i",
            "base.pbm",
            "-v",
            "RingN,ChainGridN",
            "-t",
            "20",
            "-c",
            "propagated",
            "-d",
            "3",
            "-m",
            "decompose",
            "-r",
            "4",
            "--target",
            "2",
            "-o",
            "out.pgm",
            "-s",
            "best.json",
            "--quiet",
        ]);
        assert!(cli.quiet);
        let args = search_args(cli).expect("search command");
        assert_eq!(args.input, Some(PathBuf::from("base.pbm")));
        assert_eq!(args.iterations, 20);
        assert_eq!(args.comparator, ComparatorKind::Propagated);
        assert_eq!(args.comparator_config().depth, 3);
        assert_eq!(args.mode, Mode::Decompose);
        assert_eq!(args.rounds, 4);
        assert_eq!(args.target, Some(2));
        assert_eq!(args.output_path(), PathBuf::from("out.pgm"));
        assert_eq!(args.save_state, Some(PathBuf::from("best.json")));
    }

    // Tests the other subcommands
    // Verified by swapping positional arguments
    #[test]
    fn test_parse_convert_and_compare() {
        let cli = Cli::parse_from(["shapesearch", "convert", "a.png", "b.txt", "-f", "pgm"]);
        assert!(matches!(
            cli.command,
            Command::Convert {
                ref input,
                format: Some(RasterFormat::Pgm),
                ..
            } if input.as_path() == Path::new("a.png")
        ));

        let cli = Cli::parse_from(["shapesearch", "compare", "ref.png", "shape.png"]);
        assert!(matches!(
            cli.command,
            Command::Compare {
                comparator: ComparatorKind::Brute,
                ..
            }
        ));
    }

    // Tests default output naming
    // Verified by dropping the parent directory
    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("data/ref.pbm")),
            PathBuf::from("data/ref_result.pbm")
        );
        assert_eq!(output_path(Path::new("ref.bmp")), PathBuf::from("ref_result.png"));
    }

    // Tests a single search end to end
    // Verified by saving the candidate without its offset
    #[test]
    fn test_run_single_search() {
        let temp_dir = TempDir::new().expect("temp dir");
        let reference = write_reference(temp_dir.path());
        let output = temp_dir.path().join("out.pbm");
        let state = temp_dir.path().join("best.json");

        let cli = Cli::parse_from([
            "shapesearch",
            "search",
            path_arg(&reference),
            "-c",
            "brute",
            "-t",
            "50",
            "--target",
            "0",
            "-o",
            path_arg(&output),
            "-s",
            path_arg(&state),
            "--quiet",
        ]);
        let runner = Runner::new(cli);
        assert!(!runner.should_show_progress());
        runner.run().expect("search succeeds");

        assert_eq!(load_raster(&output).expect("output"), centred_block());
        let best = load_state(&state, Variant::Square).expect("state");
        assert_eq!(best.heuristic(), Some(0));
        assert_eq!(best.offset(), [1, 1]);
    }

    // Tests decomposition end to end
    // Verified by writing the residual instead of the reconstruction
    #[test]
    fn test_run_decompose() {
        let temp_dir = TempDir::new().expect("temp dir");
        let reference = write_reference(temp_dir.path());
        let output = temp_dir.path().join("out.pgm");

        let cli = Cli::parse_from([
            "shapesearch",
            "search",
            path_arg(&reference),
            "-m",
            "decompose",
            "-c",
            "brute",
            "-t",
            "30",
            "-o",
            path_arg(&output),
            "--quiet",
        ]);
        Runner::new(cli).run().expect("decompose succeeds");
        assert_eq!(load_raster(&output).expect("output"), centred_block());
    }

    // Tests conversion between formats
    // Verified by ignoring the explicit format
    #[test]
    fn test_run_convert() {
        let temp_dir = TempDir::new().expect("temp dir");
        let reference = write_reference(temp_dir.path());
        let output = temp_dir.path().join("converted.png");

        let cli = Cli::parse_from([
            "shapesearch",
            "convert",
            path_arg(&reference),
            path_arg(&output),
        ]);
        Runner::new(cli).run().expect("convert succeeds");
        assert_eq!(load_raster(&output).expect("png"), centred_block());
    }

    // Tests argument errors surface from the runner
    // Verified by guessing a format for unknown extensions
    #[test]
    fn test_run_errors() {
        let temp_dir = TempDir::new().expect("temp dir");
        let reference = write_reference(temp_dir.path());
        let output = temp_dir.path().join("out.bmp");

        let cli = Cli::parse_from([
            "shapesearch",
            "search",
            path_arg(&reference),
            "-o",
            path_arg(&output),
            "--quiet",
        ]);
        assert!(matches!(
            Runner::new(cli).run(),
            Err(SearchError::InvalidParameter { .. })
        ));

        let cli = Cli::parse_from([
            "shapesearch",
            "search",
            path_arg(&reference),
            "-v",
            "OvalN",
        ]);
        assert!(matches!(
            Runner::new(cli).run(),
            Err(SearchError::UnknownVariant { .. })
        ));
    }
}

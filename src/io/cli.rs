//! Command-line interface for searching, converting and comparing rasters

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;
use std::path::{Path, PathBuf};

use crate::comparator::{ComparatorConfig, ComparatorKind, build_comparator};
use crate::io::configuration::{
    COST_SCALE, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_ROUNDS, OUTPUT_SUFFIX, PROPAGATION_DEPTH,
    SHORTLIST_SIZE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{RasterFormat, load_raster, save_raster};
use crate::io::progress::SearchProgress;
use crate::io::state::save_state;
use crate::raster::grid::Raster;
use crate::search::decompose::{DecomposeConfig, decompose};
use crate::search::engine::{SearchConfig, SearchEngine};
use crate::search::hooks::ComparatorHooks;
use crate::shape::state::ShapeState;
use crate::shape::variant::Variant;

#[derive(Parser, Debug)]
#[command(name = "shapesearch")]
#[command(
    author,
    version,
    about = "Approximate a raster image with procedurally generated shapes"
)]
/// Command-line arguments for the shape search tool
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for the shapes that best match a reference image
    Search(SearchArgs),

    /// Convert a PNG, BMP, GIF, PBM or PGM raster to PNG, PBM or PGM
    Convert {
        /// Raster to read (PNG, BMP, GIF, PBM or PGM)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Raster to write
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        /// Output format; inferred from the output extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<RasterFormat>,
    },

    /// Print the best placement of an image inside a reference
    Compare {
        /// Reference raster
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,
        /// Candidate raster
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
        /// Comparator implementation
        #[arg(short, long, value_enum, default_value_t = ComparatorKind::Brute)]
        comparator: ComparatorKind,
    },
}

/// Whether to place one shape or decompose the whole reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One search, one shape
    #[default]
    Single,
    /// Repeated searches against the shrinking residual
    Decompose,
}

/// Arguments of the `search` subcommand
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Reference raster to approximate (PNG, BMP, GIF, PBM or PGM)
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Current reconstruction candidates are laid over
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Comma-separated variant tags, e.g. `SquareN,RingGridN`
    #[arg(short, long, default_value = "SquareN")]
    pub variants: String,

    /// Maximum expansions per search
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: usize,

    /// Comparator implementation
    #[arg(short, long, value_enum, default_value_t = ComparatorKind::Cached)]
    pub comparator: ComparatorKind,

    /// Pyramid levels for the propagated comparators
    #[arg(short, long, default_value_t = PROPAGATION_DEPTH)]
    pub depth: usize,

    /// Single search or iterative decomposition
    #[arg(short, long, value_enum, default_value_t = Mode::Single)]
    pub mode: Mode,

    /// Maximum decomposition rounds
    #[arg(short, long, default_value_t = DEFAULT_MAX_ROUNDS)]
    pub rounds: usize,

    /// Stop as soon as a shape scores at or below this distance
    #[arg(long)]
    pub target: Option<u64>,

    /// Output raster; defaults to the reference name with a suffix
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the best state as JSON
    #[arg(short, long)]
    pub save_state: Option<PathBuf>,
}

impl SearchArgs {
    /// Comparator tuning from the arguments
    pub const fn comparator_config(&self) -> ComparatorConfig {
        ComparatorConfig {
            depth: self.depth,
            shortlist_size: SHORTLIST_SIZE,
        }
    }

    /// Engine tuning from the arguments
    pub const fn search_config(&self) -> SearchConfig {
        SearchConfig {
            lifetime: Some(self.iterations),
            cost_scale: COST_SCALE,
        }
    }

    /// Where the result raster is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| output_path(&self.reference))
    }
}

/// Default output path: `<stem>_result.<ext>` next to the input
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = RasterFormat::from_path(input_path).unwrap_or(RasterFormat::Png);
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.extension()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Executes a parsed command line
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Wrap parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.cli.quiet
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be loaded, an argument is invalid,
    /// or an output cannot be written
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Search(args) => self.search(args),
            Command::Convert {
                input,
                output,
                format,
            } => Self::convert(input, output, *format),
            Command::Compare {
                reference,
                image,
                comparator,
            } => Self::compare(reference, image, *comparator),
        }
    }

    fn progress(&self) -> SearchProgress {
        if self.should_show_progress() {
            SearchProgress::new()
        } else {
            SearchProgress::hidden()
        }
    }

    fn search(&self, args: &SearchArgs) -> Result<()> {
        let variants = Variant::parse_list(&args.variants)?;
        let reference = load_raster(&args.reference)?;
        let base = args.input.as_deref().map(load_raster).transpose()?;
        let output = args.output_path();
        let format = output_format(&output, None)?;

        match args.mode {
            Mode::Single => {
                let best = self.search_single(args, &variants, &reference, base.clone())?;
                let Some(best) = best else {
                    warn!("no shape could be placed in {}", args.reference.display());
                    return Ok(());
                };
                report(&[best.describe()]);
                let canvas = base
                    .unwrap_or_else(|| Raster::new(reference.rows(), reference.cols()))
                    .overlay(best.raster(), best.offset());
                save_raster(&canvas, &output, format)?;
                if let Some(path) = &args.save_state {
                    save_state(&best, path)?;
                }
            }
            Mode::Decompose => {
                if base.is_some() {
                    warn!("decompose mode starts from a blank reconstruction; ignoring --input");
                }
                let config = DecomposeConfig {
                    max_rounds: args.rounds,
                    comparator: args.comparator,
                    comparator_config: args.comparator_config(),
                    search: args.search_config(),
                };
                let result = decompose(&reference, &variants, &config, Some(self.progress()))?;
                let lines: Vec<String> = result
                    .placements
                    .iter()
                    .map(|placement| format!("{}: {}", placement.round, placement.state.describe()))
                    .collect();
                report(&lines);
                save_raster(&result.reconstruction, &output, format)?;
                if let (Some(path), Some(last)) = (&args.save_state, result.placements.last()) {
                    save_state(&last.state, path)?;
                }
            }
        }
        Ok(())
    }

    fn search_single(
        &self,
        args: &SearchArgs,
        variants: &[Variant],
        reference: &Raster,
        base: Option<Raster>,
    ) -> Result<Option<ShapeState>> {
        let comparator = build_comparator(
            args.comparator,
            reference.clone(),
            base,
            args.comparator_config(),
        )?;
        let mut hooks = ComparatorHooks::new(comparator).with_progress(self.progress());
        if let Some(target) = args.target {
            hooks = hooks.with_target(target);
        }

        let search = args.search_config();
        let mut engine = SearchEngine::new(hooks, search);
        if let Some(progress) = engine.hooks_mut().progress_mut() {
            progress.start_round(0, search.lifetime);
        }
        for &variant in variants {
            engine.add_new(ShapeState::new(variant));
        }
        engine.run();
        if let Some(progress) = engine.hooks_mut().progress_mut() {
            progress.clear();
        }
        Ok(engine.best_state().cloned())
    }

    fn convert(input: &Path, output: &Path, format: Option<RasterFormat>) -> Result<()> {
        let format = output_format(output, format)?;
        let raster = load_raster(input)?;
        save_raster(&raster, output, format)
    }

    fn compare(reference: &Path, image: &Path, kind: ComparatorKind) -> Result<()> {
        let reference = load_raster(reference)?;
        let candidate = load_raster(image)?;
        let comparator = build_comparator(kind, reference, None, ComparatorConfig::default())?;
        let score = comparator.score(&candidate);
        let line = if score.is_impossible() {
            "candidate does not fit inside the reference".to_string()
        } else {
            format!(
                "distance {} at row {}, column {}",
                score.distance, score.offset[0], score.offset[1]
            )
        };
        report(&[line]);
        Ok(())
    }
}

fn output_format(path: &Path, explicit: Option<RasterFormat>) -> Result<RasterFormat> {
    explicit
        .or_else(|| RasterFormat::from_path(path))
        .ok_or_else(|| {
            invalid_parameter(
                "output",
                &path.display(),
                &"unknown extension; use .png, .pbm or .pgm",
            )
        })
}

// Results go to stdout so they can be piped
#[allow(clippy::print_stdout)]
fn report(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

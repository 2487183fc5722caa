//! Search constants and runtime configuration defaults

/// Cell value for background pixels
pub const BACKGROUND: i32 = 0;
/// Cell value drawn by shape generators
pub const FOREGROUND: i32 = 255;

// Cost bounds applied to freshly initialised shapes
/// Default upper bound on accumulated transform cost
pub const DEFAULT_MAX_COST: u32 = 100_000;
/// Default cost added by each transform
pub const DEFAULT_TRANSFORM_COST: u32 = 1;

// Accumulated cost is divided by this before adding the heuristic, so the
// heuristic dominates and cost only breaks ties
/// Divisor applied to accumulated cost when computing frontier priority
pub const COST_SCALE: f64 = 10_000.0;

/// Number of dilation levels in the comparator pyramid
pub const PROPAGATION_DEPTH: usize = 5;

/// Number of offsets retained by the cached comparator between flushes
pub const SHORTLIST_SIZE: usize = 50;

// Default values for configurable parameters
/// Default number of search steps per run
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// Default number of decompose rounds
pub const DEFAULT_MAX_ROUNDS: usize = 8;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

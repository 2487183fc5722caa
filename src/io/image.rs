//! Raster codecs: 8-bit grayscale PNG and plain-text PBM/PGM
//!
//! PNG, BMP and GIF pixels load as their luma value; only PNG is written.
//! Plain PBM (`P1`) ink cells load as foreground (255) and blank cells as
//! background; plain PGM (`P2`) values are rescaled from the declared maximum
//! to 0..=255. Text headers and data may contain `#` comments.

use clap::ValueEnum;
use image::GrayImage;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::io::configuration::{BACKGROUND, FOREGROUND};
use crate::io::error::{Result, SearchError, invalid_data};
use crate::raster::grid::Raster;

/// Largest maximum value a plain graymap may declare
const PNM_MAX_VALUE: usize = 65_535;

/// On-disk raster format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RasterFormat {
    /// 8-bit grayscale PNG
    Png,
    /// Plain bitmap, `P1`
    Pbm,
    /// Plain graymap, `P2`
    Pgm,
}

impl RasterFormat {
    /// Format implied by a file extension, if recognised
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "png" => Some(Self::Png),
            "pbm" => Some(Self::Pbm),
            "pgm" => Some(Self::Pgm),
            _ => None,
        }
    }

    /// Conventional file extension
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pbm => "pbm",
            Self::Pgm => "pgm",
        }
    }
}

/// Load a raster, choosing the decoder from the file extension
///
/// `.pbm`, `.pgm` and `.pnm` files are parsed as plain-text PNM; PNG, BMP and
/// GIF files are decoded by the `image` crate and converted to grayscale.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if a PNM body
/// holds a different number of values than its header declares
pub fn load_raster(path: &Path) -> Result<Raster> {
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "pbm" | "pgm" | "pnm"));

    if is_text {
        let text = fs::read_to_string(path).map_err(|source| SearchError::FileSystem {
            path: path.to_path_buf(),
            operation: "read",
            source,
        })?;
        return parse_pnm(&text);
    }

    let image = image::open(path).map_err(|source| SearchError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = image.to_luma8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let cells = gray.pixels().map(|pixel| i32::from(pixel.0[0])).collect();
    Raster::from_flat(height, width, cells)
}

/// Save a raster in the given format, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written
pub fn save_raster(raster: &Raster, path: &Path, format: RasterFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SearchError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }

    match format {
        RasterFormat::Png => {
            let (rows, cols) = raster.dim();
            let image = GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
                let value = raster.get(y as usize, x as usize).unwrap_or(BACKGROUND);
                image::Luma([value.clamp(0, 255) as u8])
            });
            image.save(path).map_err(|source| SearchError::ImageExport {
                path: path.to_path_buf(),
                source,
            })
        }
        RasterFormat::Pbm | RasterFormat::Pgm => {
            let text = encode_pnm(raster, format);
            fs::write(path, text).map_err(|source| SearchError::FileSystem {
                path: path.to_path_buf(),
                operation: "write",
                source,
            })
        }
    }
}

/// Parse a plain-text `P1` or `P2` document
///
/// # Errors
///
/// Returns an error for an unknown magic number, a malformed header, or a
/// value count that disagrees with the declared width and height
pub fn parse_pnm(text: &str) -> Result<Raster> {
    let mut tokens = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace);

    let magic = tokens
        .next()
        .ok_or_else(|| invalid_data(&"empty PNM document"))?;
    let bitmap = match magic {
        "P1" => true,
        "P2" => false,
        other => {
            return Err(invalid_data(&format!(
                "unsupported PNM magic number '{other}'"
            )));
        }
    };

    let width = header_value(tokens.next(), "width")?;
    let height = header_value(tokens.next(), "height")?;
    let expected = width
        .checked_mul(height)
        .ok_or_else(|| invalid_data(&format!("PNM dimensions {width}x{height} are too large")))?;
    let max_value = if bitmap {
        1
    } else {
        let max_value = header_value(tokens.next(), "maximum value")?;
        if max_value == 0 || max_value > PNM_MAX_VALUE {
            return Err(invalid_data(&format!(
                "PNM maximum value {max_value} is outside 1..={PNM_MAX_VALUE}"
            )));
        }
        max_value
    };

    // Grows with the data actually present, never with the header's claim
    let mut values = Vec::new();
    for token in tokens {
        if bitmap {
            // Plain bitmaps may pack digits without separators
            for digit in token.chars() {
                values.push(match digit {
                    '0' => BACKGROUND,
                    '1' => FOREGROUND,
                    other => {
                        return Err(invalid_data(&format!("invalid bitmap digit '{other}'")));
                    }
                });
            }
        } else {
            let value: usize = token
                .parse()
                .map_err(|_parse_error| invalid_data(&format!("invalid graymap value '{token}'")))?;
            values.push((value.min(max_value) * 255 / max_value) as i32);
        }
        if values.len() > expected {
            break;
        }
    }

    if values.len() != expected {
        let found = if values.len() > expected {
            format!("more than {expected}")
        } else {
            values.len().to_string()
        };
        return Err(invalid_data(&format!(
            "PNM declares {width}x{height} = {expected} values but contains {found}"
        )));
    }
    Raster::from_flat(height, width, values)
}

/// Render a raster as plain-text `P1` (non-background is ink) or `P2`
///
/// `Png` is treated as `P2`.
pub fn encode_pnm(raster: &Raster, format: RasterFormat) -> String {
    let (rows, cols) = raster.dim();
    let bitmap = format == RasterFormat::Pbm;
    let mut text = if bitmap {
        format!("P1\n{cols} {rows}\n")
    } else {
        format!("P2\n{cols} {rows}\n255\n")
    };
    for row in raster.cells().rows() {
        let line: Vec<String> = row
            .iter()
            .map(|&value| {
                if bitmap {
                    u8::from(value != BACKGROUND).to_string()
                } else {
                    value.clamp(0, 255).to_string()
                }
            })
            .collect();
        let _ = writeln!(text, "{}", line.join(" "));
    }
    text
}

fn header_value(token: Option<&str>, field: &str) -> Result<usize> {
    let token = token.ok_or_else(|| invalid_data(&format!("PNM header is missing the {field}")))?;
    token
        .parse()
        .map_err(|_parse_error| invalid_data(&format!("PNM {field} '{token}' is not a number")))
}

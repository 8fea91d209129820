//! Tile-pyramid configuration.
//!
//! The root box and tile size are supplied by the caller once, at
//! [`TileSelector`](crate::TileSelector) construction; nothing is read from
//! process-wide state.  The remaining pyramid parameters are properties of the
//! rendered tile asset set and are fixed constants.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rm_core::BoundingBox;

use crate::{RasterError, RasterResult};

/// Converts a longitude span in degrees to the linear unit LDPP is compared
/// in.  Matches the physical scale the pyramid was rendered at.
pub const LON_SCALE: f64 = 288_200.0;

/// Deepest zoom level present in the pyramid.
pub const MAX_DEPTH: u32 = 7;

/// From this depth on, the pyramid has one row and one column fewer than a
/// full quadtree (max index `2^d − 2` instead of `2^d − 1`).
pub const TRIMMED_FROM_DEPTH: u32 = 4;

/// Fixed parameters of one tile pyramid.
///
/// # JSON
///
/// ```json
/// {
///   "root": { "ullon": -122.30, "ullat": 37.88, "lrlon": -122.20, "lrlat": 37.82 },
///   "tile_size": 256
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RasterConfig {
    /// Box covered by the single depth-0 tile.
    pub root: BoundingBox,
    /// Width and height of one rendered tile, in pixels.
    pub tile_size: f64,
}

impl RasterConfig {
    pub fn new(root: BoundingBox, tile_size: f64) -> Self {
        Self { root, tile_size }
    }

    /// Parse a JSON config and validate it.
    pub fn from_json_reader<R: Read>(reader: R) -> RasterResult<Self> {
        let config: RasterConfig =
            serde_json::from_reader(reader).map_err(|e| RasterError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`from_json_reader`](Self::from_json_reader) but reads a file.
    pub fn from_json_file(path: &Path) -> RasterResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    /// Reject configurations the tile math cannot work with.
    pub fn validate(&self) -> RasterResult<()> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(RasterError::Config(format!(
                "tile_size must be a positive number of pixels, got {}",
                self.tile_size
            )));
        }
        let r = &self.root;
        if [r.ullon, r.ullat, r.lrlon, r.lrlat].iter().any(|c| !c.is_finite()) {
            return Err(RasterError::Config("root box has a non-finite corner".into()));
        }
        if r.lon_span() <= 0.0 || r.lat_span() <= 0.0 {
            return Err(RasterError::Config(format!(
                "root box must have its upper-left corner north-west of its lower-right \
                 corner, got {r:?}"
            )));
        }
        Ok(())
    }

    /// Longitude distance per pixel of the depth-0 tile.
    pub fn root_lon_dpp(&self) -> f64 {
        lon_dpp(self.root.ullon, self.root.lrlon, self.tile_size)
    }
}

/// Longitude distance per pixel for a span drawn `width` pixels wide.
pub fn lon_dpp(ullon: f64, lrlon: f64, width: f64) -> f64 {
    (lrlon - ullon).abs() * LON_SCALE / width
}

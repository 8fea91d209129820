//! Zoom-depth and tile-grid selection.
//!
//! # Tile geometry
//!
//! Tile `(x, y)` at depth `d` spans one step east of `x` steps from the root
//! upper-left corner, where a step is the root's half-span divided by
//! `2^(d − 1)`:
//!
//! ```text
//! lon_step = (ROOT_ULLON − ROOT_MIDLON) / 2^(d−1)      (negative: west → east)
//! lat_step = (ROOT_ULLAT − ROOT_MIDLAT) / 2^(d−1)
//! ullon = ROOT_ULLON − lon_step·x        lrlon = ROOT_ULLON − lon_step·(x+1)
//! ullat = ROOT_ULLAT − lat_step·y        lrlat = ullat − lat_step
//! ```
//!
//! Depth 0 is the root tile itself.
//!
//! # Grid selection
//!
//! The overlap test splits into an x-only and a y-only condition, so the
//! selected tiles are always the product of a run of columns and a run of
//! rows.  The selector finds each run with one pass over the axis instead of
//! testing every `(x, y)` pair.

use serde::{Deserialize, Serialize};
use tracing::debug;

use rm_core::{BoundingBox, GeoPoint};

use crate::config::{MAX_DEPTH, RasterConfig, TRIMMED_FROM_DEPTH, lon_dpp};
use crate::tile::{TileCoord, TileGrid};
use crate::RasterResult;

// ── Query & response ──────────────────────────────────────────────────────────

/// A raster request from the front end: the box the user is looking at and
/// how many pixels wide it will be drawn.
///
/// Corners are taken as given; inverted or out-of-root boxes are answered on a
/// best-effort basis and flagged in [`RasterResponse::query_success`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct QueryBox {
    pub ullon: f64,
    pub ullat: f64,
    pub lrlon: f64,
    pub lrlat: f64,
    /// Viewport width in pixels.
    #[serde(alias = "w")]
    pub width: f64,
}

impl QueryBox {
    pub fn new(bbox: BoundingBox, width: f64) -> Self {
        Self { ullon: bbox.ullon, ullat: bbox.ullat, lrlon: bbox.lrlon, lrlat: bbox.lrlat, width }
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.ullon, self.ullat, self.lrlon, self.lrlat)
    }
}

/// Everything the front end needs to composite one raster image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RasterResponse {
    /// Tiles to draw, row-major from the north-west corner.
    pub render_grid: TileGrid,
    pub raster_ul_lon: f64,
    pub raster_ul_lat: f64,
    pub raster_lr_lon: f64,
    pub raster_lr_lat: f64,
    pub depth: u32,
    /// `false` if the query box was inverted or reached outside the root box.
    /// The grid is filled in either way.
    pub query_success: bool,
}

impl RasterResponse {
    /// Box covered by the whole grid.  May extend past the query box.
    pub fn raster_bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.raster_ul_lon,
            self.raster_ul_lat,
            self.raster_lr_lon,
            self.raster_lr_lat,
        )
    }
}

/// Index of the tile along one axis whose span holds `at`, clamped to
/// `0..=last`.  `origin` is the root's upper-left coordinate on that axis and
/// `step` the signed tile size from [`TileSelector::tile_bounds`].
fn nearest_index(origin: f64, step: f64, at: f64, last: u32) -> u32 {
    let i = ((origin - at) / step).floor();
    if i.is_nan() || i <= 0.0 { 0 } else { (i as u32).min(last) }
}

// ── TileSelector ──────────────────────────────────────────────────────────────

/// Largest tile index along either axis at `depth`.
///
/// `2^d − 1` for a full quadtree level, one less from
/// [`TRIMMED_FROM_DEPTH`] on, where the rendered pyramid stops a row and a
/// column short.  `depth` must not exceed [`MAX_DEPTH`].
pub fn max_index(depth: u32) -> u32 {
    let full = (1u32 << depth) - 1;
    if depth < TRIMMED_FROM_DEPTH { full } else { full - 1 }
}

/// Picks and lays out pyramid tiles for query boxes.
///
/// Holds only immutable configuration, so one selector can serve any number
/// of concurrent requests by `&`.
#[derive(Clone, Debug)]
pub struct TileSelector {
    config: RasterConfig,
    root_mid: GeoPoint,
    root_lon_dpp: f64,
}

impl TileSelector {
    /// # Errors
    ///
    /// [`RasterError::Config`](crate::RasterError::Config) if the
    /// configuration fails [`RasterConfig::validate`].
    pub fn new(config: RasterConfig) -> RasterResult<Self> {
        config.validate()?;
        Ok(Self {
            root_mid: config.root.midpoint(),
            root_lon_dpp: config.root_lon_dpp(),
            config,
        })
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Coarsest depth whose tiles are at least as fine as the query needs.
    ///
    /// Starting from the root tile's longitude distance per pixel, halves it
    /// once per level until it no longer exceeds the query's, stopping at
    /// [`MAX_DEPTH`].  Non-decreasing in `width` for a fixed span.
    pub fn find_depth(&self, ullon: f64, lrlon: f64, width: f64) -> u32 {
        let query_lon_dpp = lon_dpp(ullon, lrlon, width);

        let mut tile_lon_dpp = self.root_lon_dpp;
        let mut depth = 0;
        while tile_lon_dpp > query_lon_dpp && depth < MAX_DEPTH {
            tile_lon_dpp /= 2.0;
            depth += 1;
        }
        depth
    }

    /// Geographic box of tile `(x, y)` at `depth`.
    pub fn tile_bounds(&self, x: u32, y: u32, depth: u32) -> BoundingBox {
        if depth == 0 {
            return self.config.root;
        }
        let root = &self.config.root;
        let (lon_step, lat_step) = self.steps(depth);

        let ullat = root.ullat - lat_step * f64::from(y);
        BoundingBox {
            ullon: root.ullon - lon_step * f64::from(x),
            ullat,
            lrlon: root.ullon - lon_step * f64::from(x + 1),
            lrlat: ullat - lat_step,
        }
    }

    /// Like [`tile_bounds`](Self::tile_bounds) for a [`TileCoord`].
    #[inline]
    pub fn bounds_of(&self, tile: TileCoord) -> BoundingBox {
        self.tile_bounds(tile.x, tile.y, tile.depth)
    }

    fn steps(&self, depth: u32) -> (f64, f64) {
        let root = &self.config.root;
        let divisions = 2f64.powi(depth as i32 - 1);
        (
            (root.ullon - self.root_mid.lon) / divisions,
            (root.ullat - self.root_mid.lat) / divisions,
        )
    }

    /// All tiles at `depth` that overlap `query`, as a rectangular grid.
    ///
    /// Never empty.  If no column (or no row) overlaps the query, the one
    /// nearest the query's centre on that axis stands in for it, clamped to
    /// the pyramid, so a query past the trimmed east or south strip gets the
    /// edge tiles next to it.  Depths past [`MAX_DEPTH`] do not exist in the
    /// pyramid and are treated as `MAX_DEPTH`.
    pub fn select_grid(&self, query: &BoundingBox, depth: u32) -> TileGrid {
        let depth = depth.min(MAX_DEPTH);
        let last = max_index(depth);
        let root = &self.config.root;
        let (lon_step, lat_step) = self.steps(depth);

        let mut columns: Vec<u32> = (0..=last)
            .filter(|&x| {
                let t = self.tile_bounds(x, 0, depth);
                !(t.lrlon <= query.ullon || query.lrlon <= t.ullon)
            })
            .collect();
        let mut rows: Vec<u32> = (0..=last)
            .filter(|&y| {
                let t = self.tile_bounds(0, y, depth);
                !(t.lrlat >= query.ullat || query.lrlat >= t.ullat)
            })
            .collect();

        if columns.is_empty() {
            let x = nearest_index(root.ullon, lon_step, (query.ullon + query.lrlon) / 2.0, last);
            debug!(depth, x, ?query, "no column overlaps query; using nearest");
            columns.push(x);
        }
        if rows.is_empty() {
            let y = nearest_index(root.ullat, lat_step, (query.ullat + query.lrlat) / 2.0, last);
            debug!(depth, y, ?query, "no row overlaps query; using nearest");
            rows.push(y);
        }

        let tiles: Vec<TileCoord> = rows
            .iter()
            .flat_map(|&y| columns.iter().map(move |&x| TileCoord::new(depth, x, y)))
            .collect();

        TileGrid::from_row_major(tiles)
            .unwrap_or_else(|| TileGrid::single(TileCoord::new(depth, 0, 0)))
    }

    /// `false` iff the query is inverted or some edge of it lies outside the
    /// root box.  A NaN corner fails none of those comparisons.
    pub fn query_success(&self, query: &BoundingBox) -> bool {
        !query.is_inverted() && self.config.root.contains(query)
    }

    /// Answer a raster request: depth, covering grid, and the exact bounds of
    /// that grid.
    pub fn get_map_raster(&self, query: &QueryBox) -> RasterResponse {
        let bbox = query.bbox();
        let query_success = self.query_success(&bbox);
        let depth = self.find_depth(bbox.ullon, bbox.lrlon, query.width);
        let render_grid = self.select_grid(&bbox, depth);

        let ul = self.bounds_of(render_grid.first());
        let lr = self.bounds_of(render_grid.last());

        debug!(
            depth,
            rows = render_grid.height(),
            cols = render_grid.width(),
            query_success,
            "selected raster"
        );

        RasterResponse {
            raster_ul_lon: ul.ullon,
            raster_ul_lat: ul.ullat,
            raster_lr_lon: lr.lrlon,
            raster_lr_lat: lr.lrlat,
            depth,
            query_success,
            render_grid,
        }
    }
}

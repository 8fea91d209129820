//! Tile addresses and tile grids.
//!
//! A tile is named on disk as `d<depth>_x<x>_y<y>.png`, plain decimal with no
//! padding.  Consumers resolve image assets by that name, so `Display` and
//! `FromStr` here are the naming contract.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::RasterError;

// ── TileCoord ─────────────────────────────────────────────────────────────────

/// One tile of the pyramid.  `x` grows eastwards, `y` southwards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TileCoord {
    pub depth: u32,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    #[inline]
    pub fn new(depth: u32, x: u32, y: u32) -> Self {
        Self { depth, x, y }
    }

    /// Image file name, e.g. `d2_x1_y3.png`.
    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}_x{}_y{}.png", self.depth, self.x, self.y)
    }
}

impl FromStr for TileCoord {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || RasterError::Parse(format!("invalid tile name {s:?}"));

        let stem = s.strip_suffix(".png").ok_or_else(bad)?;
        let mut parts = stem.split('_');
        let mut field = |prefix: char| -> Result<u32, RasterError> {
            parts
                .next()
                .and_then(|p| p.strip_prefix(prefix))
                .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|n| n.parse().ok())
                .ok_or_else(bad)
        };
        let tile = TileCoord::new(field('d')?, field('x')?, field('y')?);

        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(tile)
    }
}

impl Serialize for TileCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── TileGrid ──────────────────────────────────────────────────────────────────

/// A non-empty, rectangular, row-major grid of tiles at one depth.
///
/// Row 0 is the northernmost row; within a row tiles run west to east.
/// Serializes as the nested array of tile file names the front end draws.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TileGrid {
    rows: Vec<Vec<TileCoord>>,
}

impl TileGrid {
    /// Group row-major tiles into rows, starting a new row whenever `y`
    /// changes.  Returns `None` if `tiles` is empty.
    pub(crate) fn from_row_major(tiles: Vec<TileCoord>) -> Option<Self> {
        let mut rows: Vec<Vec<TileCoord>> = Vec::new();
        for tile in tiles {
            match rows.last_mut() {
                Some(row) if row[0].y == tile.y => row.push(tile),
                _ => rows.push(vec![tile]),
            }
        }
        if rows.is_empty() {
            return None;
        }
        debug_assert!(rows.iter().all(|r| r.len() == rows[0].len()), "ragged tile grid");
        Some(Self { rows })
    }

    pub(crate) fn single(tile: TileCoord) -> Self {
        Self { rows: vec![vec![tile]] }
    }

    pub fn rows(&self) -> &[Vec<TileCoord>] {
        &self.rows
    }

    /// Number of tiles per row.
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Always `false`: a grid holds at least one tile.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// North-west tile.
    pub fn first(&self) -> TileCoord {
        self.rows[0][0]
    }

    /// South-east tile.
    pub fn last(&self) -> TileCoord {
        let row = &self.rows[self.rows.len() - 1];
        row[row.len() - 1]
    }

    /// The grid as nested file names.
    pub fn file_names(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(TileCoord::file_name).collect())
            .collect()
    }
}

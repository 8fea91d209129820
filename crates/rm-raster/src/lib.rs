//! `rm-raster` — pick the pyramid tiles that cover a query box.
//!
//! Given a fixed root box and tile size, [`TileSelector::get_map_raster`]
//! chooses the coarsest zoom depth that still meets the viewport's pixel
//! density, lists every tile at that depth overlapping the query as a
//! rectangular grid, and reports the exact bounds of the grid.  The crate only
//! names tiles; it never touches image data.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`config`]   | `RasterConfig`, pyramid constants                          |
//! | [`tile`]     | `TileCoord` (file-name contract), `TileGrid`               |
//! | [`selector`] | `TileSelector`, `QueryBox`, `RasterResponse`               |
//! | [`error`]    | `RasterError`, `RasterResult<T>`                           |

pub mod config;
pub mod error;
pub mod selector;
pub mod tile;


pub use config::{LON_SCALE, MAX_DEPTH, RasterConfig, TRIMMED_FROM_DEPTH};
pub use error::{RasterError, RasterResult};
pub use selector::{QueryBox, RasterResponse, TileSelector, max_index};
pub use tile::{TileCoord, TileGrid};

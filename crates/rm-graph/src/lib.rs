//! `rm-graph` — road/intersection graph and nearest-vertex search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`graph`]  | `SpatialGraph` (adjacency + R-tree), `SpatialGraphBuilder`, `Way` |
//! | [`loader`] | `load_graph_csv`, `load_graph_readers`                     |
//! | [`osm`]    | `load_from_pbf` (feature = `"osm"` only)                   |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                             |
//!
//! Route finding is not part of this crate; a router consumes
//! [`SpatialGraph::vertices`], [`SpatialGraph::adjacent`] and
//! [`SpatialGraph::distance`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on `rm-core` types.        |

pub mod error;
pub mod graph;
pub mod loader;

#[cfg(feature = "osm")]
pub mod osm;


pub use error::{GraphError, GraphResult};
pub use graph::{SpatialGraph, SpatialGraphBuilder, Vertex, Way, clean_name, is_routable_highway};
pub use loader::{load_graph_csv, load_graph_readers};

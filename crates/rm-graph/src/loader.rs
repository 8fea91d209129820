//! CSV graph loader.
//!
//! # CSV format
//!
//! Two files.  Vertices, one row each (`name` may be empty):
//!
//! ```csv
//! id,lat,lon,name
//! 53085029,37.8700,-122.2600,
//! 53085030,37.8710,-122.2590,Oxford & Center
//! ```
//!
//! Ways, one row each.  `nodes` is a space-separated list of vertex ids;
//! `highway` may be empty.  Extra columns such as a way name are ignored:
//!
//! ```csv
//! id,nodes,highway,name
//! 6345,53085029 53085030,residential,Center Street
//! ```
//!
//! All vertices are read before any way, so rows may appear in any order
//! within each file.  The graph is pruned once both files are consumed.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use rm_core::{VertexId, WayId};

use crate::graph::{SpatialGraph, SpatialGraphBuilder, Way};
use crate::GraphError;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VertexRecord {
    id:   i64,
    lat:  f64,
    lon:  f64,
    name: Option<String>,
}

#[derive(Deserialize)]
struct WayRecord {
    id:      i64,
    nodes:   String,
    highway: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`SpatialGraph`] from a vertex CSV and a way CSV on disk.
pub fn load_graph_csv(vertices: &Path, ways: &Path) -> Result<SpatialGraph, GraphError> {
    let vertex_file = std::fs::File::open(vertices)?;
    let way_file = std::fs::File::open(ways)?;
    load_graph_readers(vertex_file, way_file)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_graph_readers<V: Read, W: Read>(
    vertices: V,
    ways: W,
) -> Result<SpatialGraph, GraphError> {
    let mut builder = SpatialGraphBuilder::new();

    // ── Vertices ──────────────────────────────────────────────────────────
    let mut vertex_reader = csv::Reader::from_reader(vertices);
    for result in vertex_reader.deserialize::<VertexRecord>() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        let id = VertexId(row.id);
        builder.add_vertex(id, row.lat, row.lon);
        if let Some(name) = non_empty(row.name) {
            builder.set_name(id, name)?;
        }
    }

    // ── Ways ──────────────────────────────────────────────────────────────
    let mut way_reader = csv::Reader::from_reader(ways);
    for result in way_reader.deserialize::<WayRecord>() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        let way = parse_way(row)?;
        let expected = way.nodes.len().saturating_sub(1);
        let linked = builder.add_way(&way);
        if way.is_routable() && linked < expected {
            warn!(
                way = %way.id,
                linked,
                expected,
                "way references vertices missing from the extract"
            );
        }
    }

    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_way(row: WayRecord) -> Result<Way, GraphError> {
    let nodes = row
        .nodes
        .split_whitespace()
        .map(|n| {
            n.parse::<VertexId>().map_err(|_| {
                GraphError::Parse(format!("way {}: invalid vertex id {n:?}", row.id))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut way = Way::new(WayId(row.id), nodes);
    way.highway = non_empty(row.highway);
    Ok(way)
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use rm_graph::osm::load_from_pbf;
//!
//! let graph = load_from_pbf(Path::new("berkeley.osm.pbf"))?;
//! ```
//!
//! # What is loaded
//!
//! Every node becomes a candidate vertex; a node's `name` tag becomes the
//! vertex name.  Only ways whose `highway=*` class passes
//! [`is_routable_highway`] produce links.  Candidates never linked by a
//! routable way are pruned when the graph is built.

use std::path::Path;

use osmpbf::{Element, ElementReader};
use tracing::debug;

use rm_core::{VertexId, WayId};

use crate::graph::{SpatialGraph, SpatialGraphBuilder, Way, is_routable_highway};
use crate::GraphError;

/// Load a road graph from an OSM PBF file.
///
/// # Errors
///
/// Returns [`GraphError::Osm`] on parse errors.
pub fn load_from_pbf(path: &Path) -> Result<SpatialGraph, GraphError> {
    // ── Phase 1: collect nodes, names and road ways in one sequential pass ──
    let reader = ElementReader::from_path(path).map_err(|e| GraphError::Osm(e.to_string()))?;

    let mut builder = SpatialGraphBuilder::new();
    let mut names: Vec<(VertexId, String)> = Vec::new();
    let mut road_ways: Vec<Way> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let id = VertexId(n.id());
                builder.add_vertex(id, n.lat(), n.lon());
                if let Some((_, v)) = n.tags().find(|(k, _)| *k == "name") {
                    names.push((id, v.to_owned()));
                }
            }
            Element::DenseNode(n) => {
                let id = VertexId(n.id());
                builder.add_vertex(id, n.lat(), n.lon());
                if let Some((_, v)) = n.tags().find(|(k, _)| *k == "name") {
                    names.push((id, v.to_owned()));
                }
            }
            Element::Way(w) => {
                let highway = w.tags().find(|(k, _)| *k == "highway").map(|(_, v)| v);

                if let Some(highway) = highway.filter(|h| is_routable_highway(h)) {
                    let nodes = w.refs().map(VertexId).collect();
                    road_ways.push(Way::new(WayId(w.id()), nodes).with_highway(highway));
                }
            }
            _ => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    // ── Phase 2: names and links ──────────────────────────────────────────
    for (id, name) in names {
        builder.set_name(id, name)?;
    }

    let links: usize = road_ways.iter().map(|w| builder.add_way(w)).sum();
    debug!(ways = road_ways.len(), links, "linked road ways");

    Ok(builder.build())
}

//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Vertices are keyed by their extract id in an `FxHashMap`.  Each vertex
//! carries its own ordered neighbor list; links are undirected, so every
//! link appears in both endpoints' lists.
//!
//! # Lifecycle
//!
//! A loader drives [`SpatialGraphBuilder`] (`add_vertex`, `add_edge`,
//! `set_name`, `add_way`) and then calls [`build`](SpatialGraphBuilder::build)
//! once.  `build` prunes every vertex left without neighbors and bulk-loads
//! the spatial index.  The resulting [`SpatialGraph`] has no mutating
//! methods, so it can be shared by `&` across threads.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over unit-sphere Cartesian coordinates answers
//! [`SpatialGraph::closest`].  Chord length is monotone in great-circle
//! distance, so the index returns the same vertex as the haversine linear
//! scan in [`SpatialGraph::closest_linear`] except on exact ties.

use std::hash::{Hash, Hasher};

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use rm_core::{GeoPoint, VertexId, WayId, bearing_deg, distance_miles};

use crate::{GraphError, GraphResult};

// ── R-tree vertex entry ───────────────────────────────────────────────────────

#[derive(Clone)]
struct VertexEntry {
    point: [f64; 3], // unit-sphere x, y, z
    id: VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared chord length on the unit sphere.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── Vertex ────────────────────────────────────────────────────────────────────

/// One intersection or way node.
///
/// Equality and hashing use `id` only.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub id: VertexId,
    pub pos: GeoPoint,
    pub name: Option<String>,
    neighbors: Vec<VertexId>,
}

impl Vertex {
    fn new(id: VertexId, pos: GeoPoint) -> Self {
        Self { id, pos, name: None, neighbors: Vec::new() }
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.pos.lon
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.pos.lat
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ── Way ───────────────────────────────────────────────────────────────────────

/// An ordered chain of vertices as delivered by the extract parser.
///
/// Consecutive node pairs become undirected links when the way is added to a
/// [`SpatialGraphBuilder`].
#[derive(Clone, Debug)]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<VertexId>,
    /// The `highway=*` class, if the parser saw one.
    pub highway: Option<String>,
}

impl Way {
    pub fn new(id: WayId, nodes: Vec<VertexId>) -> Self {
        Self { id, nodes, highway: None }
    }

    pub fn with_highway(mut self, highway: impl Into<String>) -> Self {
        self.highway = Some(highway.into());
        self
    }

    /// `false` only for ways tagged with a non-routable highway class.
    /// Untagged ways are taken as routable.
    pub fn is_routable(&self) -> bool {
        self.highway.as_deref().is_none_or(is_routable_highway)
    }
}

/// `highway=*` classes that make up the routable road network.
///
/// Footways, cycleways, service roads, tracks and the like are left out.
pub fn is_routable_highway(highway: &str) -> bool {
    matches!(
        highway,
        "motorway"
            | "trunk"
            | "primary"
            | "secondary"
            | "tertiary"
            | "unclassified"
            | "residential"
            | "living_street"
            | "motorway_link"
            | "trunk_link"
            | "primary_link"
            | "secondary_link"
            | "tertiary_link"
    )
}

/// Reduce a name to lower-case letters and spaces, for fuzzy name lookups.
pub fn clean_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ── SpatialGraph ──────────────────────────────────────────────────────────────

/// Read-only road graph plus a spatial index for nearest-vertex search.
///
/// Do not construct directly; use [`SpatialGraphBuilder`].
pub struct SpatialGraph {
    vertices: FxHashMap<VertexId, Vertex>,
    link_count: usize,
    spatial_idx: RTree<VertexEntry>,
}

impl SpatialGraph {
    /// A graph with no vertices.  Every nearest-vertex query against it
    /// returns [`GraphError::EmptyGraph`].
    pub fn empty() -> Self {
        SpatialGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected links.
    pub fn edge_count(&self) -> usize {
        self.link_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ── Enumeration & lookup ──────────────────────────────────────────────

    /// Ids of all vertices that survived pruning, in map iteration order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(&v)
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains_key(&v)
    }

    fn get(&self, v: VertexId) -> GraphResult<&Vertex> {
        self.vertices.get(&v).ok_or(GraphError::VertexNotFound(v))
    }

    /// Ids of all vertices adjacent to `v`.
    ///
    /// Returns an owned copy; the graph's own lists are never handed out
    /// mutably.
    pub fn adjacent(&self, v: VertexId) -> GraphResult<Vec<VertexId>> {
        Ok(self.get(v)?.neighbors.clone())
    }

    pub fn lon(&self, v: VertexId) -> GraphResult<f64> {
        Ok(self.get(v)?.lon())
    }

    pub fn lat(&self, v: VertexId) -> GraphResult<f64> {
        Ok(self.get(v)?.lat())
    }

    pub fn position(&self, v: VertexId) -> GraphResult<GeoPoint> {
        Ok(self.get(v)?.pos)
    }

    pub fn name(&self, v: VertexId) -> GraphResult<Option<&str>> {
        Ok(self.get(v)?.name.as_deref())
    }

    /// Vertices whose cleaned name equals the cleaned `query`, sorted by id.
    pub fn find_by_name(&self, query: &str) -> Vec<VertexId> {
        let wanted = clean_name(query);
        let mut hits: Vec<VertexId> = self
            .vertices
            .values()
            .filter(|v| v.name.as_deref().is_some_and(|n| clean_name(n) == wanted))
            .map(|v| v.id)
            .collect();
        hits.sort_unstable();
        hits
    }

    // ── Great-circle measures ─────────────────────────────────────────────

    /// Great-circle distance between `v` and `w` in miles.
    pub fn distance(&self, v: VertexId, w: VertexId) -> GraphResult<f64> {
        let (a, b) = (self.get(v)?.pos, self.get(w)?.pos);
        Ok(distance_miles(a.lon, a.lat, b.lon, b.lat))
    }

    /// Initial bearing in degrees (`-180..=180`) from `v` towards `w`.
    pub fn bearing(&self, v: VertexId, w: VertexId) -> GraphResult<f64> {
        let (a, b) = (self.get(v)?.pos, self.get(w)?.pos);
        Ok(bearing_deg(a.lon, a.lat, b.lon, b.lat))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Id of the vertex nearest to `(lon, lat)` by great-circle distance.
    pub fn closest(&self, lon: f64, lat: f64) -> GraphResult<VertexId> {
        let query = GeoPoint::new(lat, lon).to_unit_vector();
        self.spatial_idx
            .nearest_neighbor(&query)
            .map(|e| e.id)
            .ok_or(GraphError::EmptyGraph)
    }

    /// Linear-scan reference for [`closest`](Self::closest).
    ///
    /// O(n) per query.  Ties go to the first vertex in iteration order.
    pub fn closest_linear(&self, lon: f64, lat: f64) -> GraphResult<VertexId> {
        let mut best: Option<(VertexId, f64)> = None;
        for v in self.vertices.values() {
            let d = distance_miles(lon, lat, v.pos.lon, v.pos.lat);
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((v.id, d));
            }
        }
        best.map(|(id, _)| id).ok_or(GraphError::EmptyGraph)
    }
}

// ── SpatialGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`SpatialGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rm_core::VertexId;
/// use rm_graph::SpatialGraphBuilder;
///
/// let mut b = SpatialGraphBuilder::new();
/// b.add_vertex(VertexId(1), 37.870, -122.260);
/// b.add_vertex(VertexId(2), 37.871, -122.259);
/// b.add_vertex(VertexId(3), 37.900, -122.100); // never linked
/// b.add_edge(VertexId(1), VertexId(2)).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2); // 3 was pruned
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct SpatialGraphBuilder {
    vertices: FxHashMap<VertexId, Vertex>,
}

impl SpatialGraphBuilder {
    pub fn new() -> Self {
        Self { vertices: FxHashMap::default() }
    }

    /// Add a vertex.  Re-adding an existing id moves it and keeps its links
    /// and name.
    pub fn add_vertex(&mut self, id: VertexId, lat: f64, lon: f64) {
        let pos = GeoPoint::new(lat, lon);
        self.vertices
            .entry(id)
            .and_modify(|v| v.pos = pos)
            .or_insert_with(|| Vertex::new(id, pos));
    }

    /// Attach a display name to a vertex added earlier.
    pub fn set_name(&mut self, id: VertexId, name: impl Into<String>) -> GraphResult<()> {
        let v = self.vertices.get_mut(&id).ok_or(GraphError::VertexNotFound(id))?;
        v.name = Some(name.into());
        Ok(())
    }

    /// Link `a` and `b`, appending each to the other's neighbor list.
    ///
    /// Both endpoints must already exist.  A self-link is ignored: a vertex
    /// is never its own neighbor.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> GraphResult<()> {
        for id in [a, b] {
            if !self.vertices.contains_key(&id) {
                return Err(GraphError::VertexNotFound(id));
            }
        }
        if a == b {
            return Ok(());
        }
        if let Some(v) = self.vertices.get_mut(&a) {
            v.neighbors.push(b);
        }
        if let Some(v) = self.vertices.get_mut(&b) {
            v.neighbors.push(a);
        }
        Ok(())
    }

    /// Link every consecutive node pair of `way`.  Returns the number of
    /// links added.
    ///
    /// Ways tagged with a non-routable highway class are ignored.  Pairs
    /// with an endpoint missing from the builder (ways often run past the
    /// edge of an extract) are skipped.
    pub fn add_way(&mut self, way: &Way) -> usize {
        if !way.is_routable() {
            return 0;
        }
        let mut linked = 0;
        for pair in way.nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a == b {
                continue;
            }
            match self.add_edge(a, b) {
                Ok(()) => linked += 1,
                Err(e) => debug!(way = %way.id, "skipping link: {e}"),
            }
        }
        linked
    }

    /// Consume the builder: prune vertices with no neighbors, then bulk-load
    /// the spatial index.
    ///
    /// Pruning happens here and nowhere else, so it runs exactly once per
    /// graph.
    pub fn build(self) -> SpatialGraph {
        let loaded = self.vertices.len();

        let mut vertices = self.vertices;
        vertices.retain(|_, v| !v.neighbors.is_empty());

        let link_count = vertices.values().map(|v| v.neighbors.len()).sum::<usize>() / 2;

        let entries: Vec<VertexEntry> = vertices
            .values()
            .map(|v| VertexEntry { point: v.pos.to_unit_vector(), id: v.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        info!(
            loaded,
            pruned = loaded - vertices.len(),
            vertices = vertices.len(),
            links = link_count,
            "built spatial graph"
        );

        SpatialGraph { vertices, link_count, spatial_idx }
    }
}

impl Default for SpatialGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

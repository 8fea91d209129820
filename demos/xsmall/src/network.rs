//! Hand-built street graph used when no CSV files are given.
//!
//! Six intersections around downtown Berkeley, inside the demo pyramid's
//! root box.  Vertex 900 is a survey marker on no street and is pruned when
//! the graph is built.

use rm_core::{VertexId, WayId};
use rm_graph::{GraphResult, SpatialGraph, SpatialGraphBuilder, Way};

/// Build the demo graph.
pub fn build_network() -> GraphResult<SpatialGraph> {
    let mut b = SpatialGraphBuilder::new();

    let shattuck_center     = VertexId(101);
    let shattuck_university = VertexId(102);
    let oxford_center       = VertexId(103);
    let oxford_university   = VertexId(104);
    let telegraph_bancroft  = VertexId(105);
    let telegraph_dwight    = VertexId(106);
    let survey_marker       = VertexId(900);

    b.add_vertex(shattuck_center,     37.8702, -122.2681);
    b.add_vertex(shattuck_university, 37.8719, -122.2685);
    b.add_vertex(oxford_center,       37.8704, -122.2661);
    b.add_vertex(oxford_university,   37.8722, -122.2664);
    b.add_vertex(telegraph_bancroft,  37.8688, -122.2590);
    b.add_vertex(telegraph_dwight,    37.8646, -122.2585);
    b.add_vertex(survey_marker,       37.8600, -122.2700);

    b.set_name(shattuck_center, "Shattuck Avenue & Center Street")?;
    b.set_name(telegraph_bancroft, "Telegraph Avenue & Bancroft Way")?;

    let streets = [
        (1, vec![shattuck_university, shattuck_center], "primary"),       // Shattuck Avenue
        (2, vec![oxford_university, oxford_center], "secondary"),         // Oxford Street
        (3, vec![shattuck_center, oxford_center], "residential"),         // Center Street
        (4, vec![shattuck_university, oxford_university], "secondary"),   // University Avenue
        (5, vec![telegraph_bancroft, telegraph_dwight], "tertiary"),      // Telegraph Avenue
        (6, vec![telegraph_dwight, survey_marker], "footway"),            // not a street: ignored
    ];
    for (id, nodes, highway) in streets {
        b.add_way(&Way::new(WayId(id), nodes).with_highway(highway));
    }
    // Untagged link across the campus edge.
    b.add_edge(oxford_center, telegraph_bancroft)?;

    Ok(b.build())
}

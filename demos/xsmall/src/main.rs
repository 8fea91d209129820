//! xsmall — smallest end-to-end run of the rastermap workspace.
//!
//! Builds a six-intersection street graph (or loads one from CSV), answers a
//! few nearest-vertex and distance queries, then asks the tile selector which
//! pyramid tiles to draw for a handful of viewports and prints each response
//! as the JSON a front end would receive.
//!
//! ```text
//! xsmall [--config raster.json] [vertices.csv ways.csv]
//! ```
//!
//! Set `RUST_LOG=debug` to see the library's tracing output.

mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rm_core::BoundingBox;
use rm_graph::{SpatialGraph, load_graph_csv};
use rm_raster::{QueryBox, RasterConfig, TileSelector};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Root box of the demo pyramid when no config file is given.
const ROOT: BoundingBox = BoundingBox {
    ullon: -122.2998046875,
    ullat: 37.892195547244356,
    lrlon: -122.2119140625,
    lrlat: 37.82280243352756,
};
const TILE_SIZE: f64 = 256.0;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Nearest-vertex and tile-raster queries over a small street graph")]
struct Args {
    /// Tile pyramid configuration (JSON with `root` and `tile_size`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vertex CSV (`id,lat,lon,name`).  Without it the built-in graph is used.
    #[arg(requires = "ways")]
    vertices: Option<PathBuf>,

    /// Way CSV (`id,nodes,highway`).
    #[arg(requires = "vertices")]
    ways: Option<PathBuf>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== xsmall — rastermap ===");
    println!();

    // 1. Street graph.
    let t0 = Instant::now();
    let graph = match (&args.vertices, &args.ways) {
        (Some(vertices), Some(ways)) => load_graph_csv(vertices, ways)
            .with_context(|| format!("loading {} / {}", vertices.display(), ways.display()))?,
        _ => build_network()?,
    };
    println!(
        "Street graph: {} vertices, {} links ({:.3} ms)",
        graph.vertex_count(),
        graph.edge_count(),
        t0.elapsed().as_secs_f64() * 1e3
    );
    print_graph_queries(&graph)?;
    println!();

    // 2. Tile selector.
    let config = match &args.config {
        Some(path) => RasterConfig::from_json_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => RasterConfig::new(ROOT, TILE_SIZE),
    };
    let selector = TileSelector::new(config)?;

    let root = selector.config().root;
    let queries = [
        ("whole root", QueryBox::new(root, 256.0)),
        (
            "downtown",
            QueryBox::new(BoundingBox::new(-122.2710, 37.8730, -122.2560, 37.8640), 1_085.0),
        ),
        (
            "street level",
            QueryBox::new(BoundingBox::new(-122.2690, 37.8715, -122.2655, 37.8695), 800.0),
        ),
        (
            "off the map",
            QueryBox::new(BoundingBox::new(-122.40, 37.95, -122.35, 37.90), 512.0),
        ),
    ];

    for (label, query) in &queries {
        let response = selector.get_map_raster(query);
        println!(
            "{label}: depth {}, {}×{} tiles, success = {}",
            response.depth,
            response.render_grid.height(),
            response.render_grid.width(),
            response.query_success
        );
        println!("{}", serde_json::to_string_pretty(&response)?);
        println!();
    }

    Ok(())
}

fn print_graph_queries(graph: &SpatialGraph) -> Result<()> {
    if graph.is_empty() {
        println!("  (graph is empty; skipping queries)");
        return Ok(());
    }

    let probes = [(-122.2679, 37.8705), (-122.2600, 37.8690), (-122.2500, 37.8500)];
    for (lon, lat) in probes {
        let v = graph.closest(lon, lat)?;
        let name = graph.name(v)?.unwrap_or("(unnamed)");
        println!("  closest to ({lon:.4}, {lat:.4}): {v} {name}");
    }

    println!("{:<14} {:<14} {:>10} {:>10}", "From", "To", "Miles", "Bearing");
    println!("{}", "-".repeat(51));
    let mut ids: Vec<_> = graph.vertices().collect();
    ids.sort();
    for &v in &ids {
        for w in graph.adjacent(v)? {
            if v < w {
                println!(
                    "{:<14} {:<14} {:>10.4} {:>10.1}",
                    v.to_string(),
                    w.to_string(),
                    graph.distance(v, w)?,
                    graph.bearing(v, w)?
                );
            }
        }
    }
    Ok(())
}

//! `rm-core` — shared coordinate math for the `rastermap` workspace.
//!
//! Both `rm-graph` and `rm-raster` depend on this crate, and on nothing else
//! from the workspace.  The two engines share only what lives here.
//!
//! # What lives here
//!
//! | Module  | Contents                                                    |
//! |---------|-------------------------------------------------------------|
//! | [`ids`] | `VertexId`, `WayId`                                         |
//! | [`geo`] | `GeoPoint`, `BoundingBox`, haversine distance, bearing      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{BoundingBox, EARTH_RADIUS_MILES, GeoPoint, bearing_deg, distance_miles};
pub use ids::{VertexId, WayId};

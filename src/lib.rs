//! Points laid out on a two-angle spherical grid, connected into a graph by
//! proximity heuristics and handed to a line-segment renderer.

pub mod config;
pub mod error;
pub mod graph;
pub mod points;
pub mod render;
pub mod session;

pub use config::{ConnectionMode, DEFAULT_GEOM_LIMIT, GenerationConfig, MAX_POINTS};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeList, build, build_with};
pub use points::{Point, PointField, RADIUS, generate, grid_point};
pub use render::{GeometrySink, LineSegments, SegmentLayer};
pub use session::Session;

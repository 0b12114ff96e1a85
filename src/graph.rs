//! Edge construction over a point field.
//!
//! All three connection modes scan every `(p1, p2)` pair in row-major order
//! over `p1`, then `p2`. Building stops as soon as the flattened edge list
//! (two entries per edge) grows past the configured limit. The stop ends
//! the whole build, not only the scan of the current `p1`.

use std::ops::ControlFlow;

use crate::config::{ConnectionMode, GenerationConfig};
use crate::points::Point;

pub type Edge = (Point, Point);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeList {
    edges: Vec<Edge>,
    limit_reached: bool,
}

impl EdgeList {
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the flattened length passed the limit and building stopped.
    /// The edge that passed it is kept. Later edges, if there would have
    /// been any, were never scanned, so this does not mean edges were lost.
    #[must_use]
    pub const fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    /// Number of entries in the flattened `p1, p2, p1, p2, ...` form.
    #[must_use]
    pub fn flattened_len(&self) -> usize {
        self.edges.len() * 2
    }

    /// Alternating endpoints, ready for a line-segment renderer.
    #[must_use]
    pub fn flattened(&self) -> Vec<Point> {
        self.edges.iter().flat_map(|(a, b)| [*a, *b]).collect()
    }
}

struct Collector {
    edges: Vec<Edge>,
    geom_limit: usize,
    limit_reached: bool,
}

impl Collector {
    const fn new(geom_limit: usize) -> Self {
        Self {
            edges: Vec::new(),
            geom_limit,
            limit_reached: false,
        }
    }

    fn push(&mut self, p1: Point, p2: Point) -> ControlFlow<()> {
        self.edges.push((p1, p2));
        if self.edges.len() * 2 > self.geom_limit {
            self.limit_reached = true;
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn finish(self) -> EdgeList {
        EdgeList {
            edges: self.edges,
            limit_reached: self.limit_reached,
        }
    }
}

fn distance(a: &Point, b: &Point) -> f64 {
    (a - b).norm()
}

fn connect_by_threshold(points: &[Point], threshold: f64, out: &mut Collector) {
    for p1 in points {
        for p2 in points {
            if distance(p1, p2) < threshold && out.push(*p1, *p2).is_break() {
                return;
            }
        }
    }
}

/// Picks the last qualifying neighbour in scan order, not the nearest one.
fn connect_by_closest_threshold(points: &[Point], threshold: f64, out: &mut Collector) {
    for p1 in points {
        let chosen = points
            .iter()
            .rev()
            .find(|p2| distance(p1, p2) < threshold && *p2 != p1)
            .unwrap_or(p1);
        if out.push(*p1, *chosen).is_break() {
            return;
        }
    }
}

fn connect_by_closest(points: &[Point], out: &mut Collector) {
    for p1 in points {
        let (mut closest, mut min_distance) = (None, f64::INFINITY);
        for p2 in points {
            let d = distance(p1, p2);
            if d < min_distance && p2 != p1 {
                (closest, min_distance) = (Some(p2), d);
            }
        }
        if out.push(*p1, *closest.unwrap_or(p1)).is_break() {
            return;
        }
    }
}

/// Connects `points` under `mode`. `threshold` is ignored by
/// [`ConnectionMode::ClosestUnconditional`].
#[must_use]
pub fn build(points: &[Point], threshold: f64, mode: ConnectionMode, geom_limit: usize) -> EdgeList {
    let mut out = Collector::new(geom_limit);
    match mode {
        ConnectionMode::DistanceThreshold => connect_by_threshold(points, threshold, &mut out),
        ConnectionMode::ClosestWithinThreshold => {
            connect_by_closest_threshold(points, threshold, &mut out);
        }
        ConnectionMode::ClosestUnconditional => connect_by_closest(points, &mut out),
    }
    let edges = out.finish();
    if edges.limit_reached() {
        log::warn!(
            "edge limit reached at {} entries (limit {geom_limit}, mode {mode}, {} points)",
            edges.flattened_len(),
            points.len()
        );
    } else {
        log::debug!("built {} edges from {} points (mode {mode})", edges.len(), points.len());
    }
    edges
}

/// [`build`] with threshold, mode and limit taken from `config`.
#[must_use]
pub fn build_with(points: &[Point], config: &GenerationConfig) -> EdgeList {
    build(points, config.connection_threshold, config.mode, config.geom_limit)
}

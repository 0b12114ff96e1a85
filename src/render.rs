//! Boundary towards whatever draws the edges.

use crate::graph::EdgeList;

/// Receives a new edge list every time the geometry is rebuilt.
pub trait GeometrySink {
    fn replace_geometry(&mut self, edges: &EdgeList);
}

/// A drawable line-segment buffer: consecutive vertex pairs form segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegments {
    pub vertices: Vec<[f32; 3]>,
    /// Copied from [`EdgeList::limit_reached`].
    pub limit_reached: bool,
}

impl LineSegments {
    #[must_use]
    pub fn from_edges(edges: &EdgeList) -> Self {
        let vertices = edges
            .flattened()
            .iter()
            .map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect();
        Self {
            vertices,
            limit_reached: edges.limit_reached(),
        }
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

/// Owns the single drawable currently on screen and swaps it on every
/// rebuild.
#[derive(Debug, Default)]
pub struct SegmentLayer {
    current: Option<LineSegments>,
    generation: u64,
}

impl SegmentLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> Option<&LineSegments> {
        self.current.as_ref()
    }

    /// How many times the drawable has been replaced.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl GeometrySink for SegmentLayer {
    fn replace_geometry(&mut self, edges: &EdgeList) {
        let previous = self.current.replace(LineSegments::from_edges(edges));
        self.generation += 1;
        log::trace!(
            "replaced drawable #{} ({} -> {} segments)",
            self.generation,
            previous.map_or(0, |p| p.segment_count()),
            edges.len()
        );
    }
}

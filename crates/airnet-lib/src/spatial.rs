//! KD-tree proximity index over airport coordinates.
//!
//! Airports are projected onto Earth-centred Cartesian coordinates so that a
//! Euclidean KD-tree can answer great-circle radius queries. A surface radius
//! is converted to the equivalent chord length for the tree query, and the
//! candidates are then filtered by exact haversine distance.

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;

use crate::geo::{chord_for_surface_distance, Position};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Slack added to the chord radius to absorb floating-point error at the boundary.
const CHORD_EPSILON_KM: f64 = 1e-6;

#[derive(Debug, Clone)]
struct IndexNode {
    code: String,
    position: Position,
}

/// Incrementally built proximity index keyed by airport code.
pub struct ProximityIndex {
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    nodes: Vec<IndexNode>,
}

impl std::fmt::Debug for ProximityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximityIndex")
            .field("len", &self.nodes.len())
            .finish()
    }
}

impl Default for ProximityIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ProximityIndex {
    pub fn new() -> Self {
        Self {
            tree: KdTree::new(),
            nodes: Vec::new(),
        }
    }

    /// Index an airport at the given position.
    pub fn insert(&mut self, code: &str, position: Position) {
        let index = self.nodes.len();
        self.tree.add(&position.to_cartesian(), index);
        self.nodes.push(IndexNode {
            code: code.to_string(),
            position,
        });
    }

    /// Find all airports within `radius_km` (great-circle) of `center`.
    ///
    /// Returns (code, distance_km) pairs sorted by distance, ties broken by code.
    pub fn within_radius(&self, center: Position, radius_km: f64) -> Vec<(String, f64)> {
        if radius_km < 0.0 || self.nodes.is_empty() {
            return Vec::new();
        }

        let chord = chord_for_surface_distance(radius_km) + CHORD_EPSILON_KM;
        let candidates = self
            .tree
            .within::<SquaredEuclidean>(&center.to_cartesian(), chord * chord);

        let mut found: Vec<(String, f64)> = candidates
            .into_iter()
            .filter_map(|neighbour| {
                let node = &self.nodes[neighbour.item];
                let distance = center.distance_to(&node.position);
                (distance <= radius_km).then(|| (node.code.clone(), distance))
            })
            .collect();

        found.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        found
    }
}

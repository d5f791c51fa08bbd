//! Insertion-ordered bijection between distinct vertices and dense
//! integer indices.

use hashbrown::HashMap;
use thiserror::Error;

use crate::{PolygonMesh, Vertex, VertexKey};

/// Errors from querying a [`VertexIndex`].
///
/// Both variants indicate a caller bug rather than bad input data:
/// the index is derived from a mesh and then only ever read back with
/// vertices and indices from that same mesh.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The queried vertex was never collected into the index.
    #[error("vertex was never collected into the index")]
    UnknownVertex,

    /// The queried integer index is past the end of the index.
    #[error("vertex index {index} out of range ({len} vertices collected)")]
    OutOfRange {
        /// The out-of-range index.
        index: u32,
        /// Number of vertices the index holds.
        len: usize,
    },
}

/// A bijection between a vertex's bit-exact identity and a dense
/// integer in `[0, len)`.
///
/// Indices are assigned in insertion order: the first time a distinct
/// identity is seen during a polygon-by-polygon, vertex-by-vertex
/// traversal it receives the next unused integer. That order is the
/// order vertices are written to output files, so repeating the same
/// traversal always reproduces the same integers.
///
/// Built once per export session from a [`PolygonMesh`] and read-only
/// afterward.
///
/// # Example
///
/// ```
/// use atlas_types::{Polygon, PolygonMesh, Vertex, VertexIndex};
///
/// let a = Vertex::from_coords(0.0, 0.0, 0.0);
/// let b = Vertex::from_coords(1.0, 0.0, 0.0);
/// let c = Vertex::from_coords(0.0, 1.0, 0.0);
/// let mesh = PolygonMesh::from_polygons(vec![
///     Polygon::new([a, b, c]),
///     Polygon::new([b, a, c]), // same identities, no new indices
/// ]);
///
/// let index = VertexIndex::collect(&mesh);
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.index_of(&c), Ok(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    indices: HashMap<VertexKey, u32>,
    vertices: Vec<Vertex>,
}

impl VertexIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a full mesh traversal.
    ///
    /// Polygons are visited in order and vertices within each polygon
    /// in order, so the resulting integer assignment is deterministic
    /// for a given mesh.
    #[must_use]
    pub fn collect(mesh: &PolygonMesh) -> Self {
        let mut index = Self::new();
        for polygon in mesh.iter() {
            for vertex in &polygon.vertices {
                index.insert(vertex);
            }
        }
        index
    }

    /// Insert a vertex, returning its index.
    ///
    /// Re-inserting an identical vertex is a no-op and returns the
    /// index assigned at first sighting.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: indices are u32, meshes with >4B distinct vertices are unsupported
    pub fn insert(&mut self, vertex: &Vertex) -> u32 {
        match self.indices.entry(vertex.key()) {
            hashbrown::hash_map::Entry::Occupied(entry) => *entry.get(),
            hashbrown::hash_map::Entry::Vacant(entry) => {
                let assigned = self.vertices.len() as u32;
                entry.insert(assigned);
                self.vertices.push(*vertex);
                assigned
            }
        }
    }

    /// Look up the index assigned to a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownVertex`] if the vertex was never
    /// collected.
    pub fn index_of(&self, vertex: &Vertex) -> Result<u32, IndexError> {
        self.indices
            .get(&vertex.key())
            .copied()
            .ok_or(IndexError::UnknownVertex)
    }

    /// Look up the vertex assigned to an index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::OutOfRange`] if `index >= len()`.
    pub fn vertex_at(&self, index: u32) -> Result<&Vertex, IndexError> {
        self.vertices
            .get(index as usize)
            .ok_or(IndexError::OutOfRange {
                index,
                len: self.vertices.len(),
            })
    }

    /// Number of distinct vertex identities collected.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether no vertices have been collected.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over vertices in insertion order.
    ///
    /// This is the order indexed exporters write their vertex tables.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::Polygon;

    fn sample_mesh() -> PolygonMesh {
        let a = Vertex::from_coords(0.0, 0.0, 0.0);
        let b = Vertex::from_coords(1.0, 0.0, 0.0);
        let c = Vertex::from_coords(0.0, 1.0, 0.0);
        let d = Vertex::from_coords(1.0, 1.0, 0.0);
        PolygonMesh::from_polygons(vec![
            Polygon::new([a, b, c]),
            Polygon::new([b, d, c]), // b and c already assigned
        ])
    }

    #[test]
    fn collect_assigns_traversal_order() {
        let index = VertexIndex::collect(&sample_mesh());
        assert_eq!(index.len(), 4);

        let a = Vertex::from_coords(0.0, 0.0, 0.0);
        let d = Vertex::from_coords(1.0, 1.0, 0.0);
        assert_eq!(index.index_of(&a), Ok(0));
        assert_eq!(index.index_of(&d), Ok(3));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut index = VertexIndex::new();
        let v = Vertex::from_coords(1.0, 2.0, 3.0);

        let first = index.insert(&v);
        let second = index.insert(&v);
        assert_eq!(first, second);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn bijection_round_trips() {
        let index = VertexIndex::collect(&sample_mesh());
        for i in 0..index.len() {
            #[allow(clippy::cast_possible_truncation)]
            let i = i as u32;
            let vertex = index.vertex_at(i).map(|v| *v);
            assert!(vertex.is_ok());
            assert_eq!(vertex.and_then(|v| index.index_of(&v)), Ok(i));
        }
    }

    #[test]
    fn unknown_vertex_is_rejected() {
        let index = VertexIndex::collect(&sample_mesh());
        let stranger = Vertex::from_coords(99.0, 99.0, 99.0);
        assert_eq!(index.index_of(&stranger), Err(IndexError::UnknownVertex));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let index = VertexIndex::collect(&sample_mesh());
        assert_eq!(
            index.vertex_at(4).map(|v| v.position.x),
            Err(IndexError::OutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn empty_index() {
        let index = VertexIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(
            index.vertex_at(0).map(|v| v.position.x),
            Err(IndexError::OutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn vertices_iterate_in_insertion_order() {
        let index = VertexIndex::collect(&sample_mesh());
        let xs: Vec<f64> = index.vertices().map(|v| v.position.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 0.0, 1.0]);
        let ys: Vec<f64> = index.vertices().map(|v| v.position.y).collect();
        assert_eq!(ys, vec![0.0, 0.0, 1.0, 1.0]);
    }
}

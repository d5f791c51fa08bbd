//! Core mesh types for atlas surface conversion.
//!
//! This crate provides the foundational types for reconstructing and
//! re-serializing triangle-strip surface data:
//!
//! - [`Vertex`] - A point in 3D space with a bit-exact identity key
//! - [`Polygon`] - A triangle with optional shared attributes
//! - [`PolygonMesh`] - An ordered sequence of triangles
//! - [`FaceColor`] - A per-face RGB color with `[0, 1]` channels
//! - [`VertexIndex`] - An insertion-ordered bijection between distinct
//!   vertices and dense integer indices, used for indexed export
//!
//! # Vertex Identity
//!
//! Deduplication is **bit-exact**: two vertices are the same only when
//! the bit patterns of all three coordinates match. There is no
//! tolerance comparison anywhere in the identity path; positions that
//! differ in the last ulp are distinct vertices.
//!
//! # Ordering
//!
//! `PolygonMesh` preserves polygon order, and `VertexIndex` assigns
//! indices in traversal order (polygon by polygon, vertex by vertex).
//! Exporters rely on both orderings being stable, so the same mesh
//! always produces the same output file.
//!
//! # Example
//!
//! ```
//! use atlas_types::{Polygon, PolygonMesh, Vertex, VertexIndex};
//!
//! let a = Vertex::from_coords(0.0, 0.0, 0.0);
//! let b = Vertex::from_coords(1.0, 0.0, 0.0);
//! let c = Vertex::from_coords(0.0, 1.0, 0.0);
//!
//! let mut mesh = PolygonMesh::new();
//! mesh.push(Polygon::new([a, b, c]));
//!
//! let index = VertexIndex::collect(&mesh);
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.index_of(&b), Ok(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod color;
mod index;
mod polygon;
mod vertex;

pub use color::FaceColor;
pub use index::{IndexError, VertexIndex};
pub use polygon::{Polygon, PolygonMesh};
pub use vertex::{Vertex, VertexKey};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

//! Vertex positions and their bit-exact identity keys.

use nalgebra::Point3;

/// Bit-exact identity of a vertex position.
///
/// Wraps the raw bit patterns of the three coordinates. Two keys are
/// equal only when the encoded bytes of both positions match exactly,
/// so `0.0` and `-0.0` are *different* identities, and a NaN position
/// is identical to itself.
///
/// This is the hashable stand-in for the position itself (floats are
/// never hashed or compared with a tolerance in the identity path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey([u64; 3]);

/// A vertex in 3D space.
///
/// Immutable position only. Normals present in the raw input are
/// consumed by the decoder but not carried here; per-face attributes
/// live on [`Polygon`](crate::Polygon) instead.
///
/// # Example
///
/// ```
/// use atlas_types::Vertex;
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(v.position.x, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Create a new vertex at the given position.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use atlas_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.z, 3.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// The bit-exact identity key of this vertex.
    ///
    /// # Example
    ///
    /// ```
    /// use atlas_types::Vertex;
    ///
    /// let a = Vertex::from_coords(0.5, 0.0, 0.0);
    /// let b = Vertex::from_coords(0.5, 0.0, 0.0);
    /// assert_eq!(a.key(), b.key());
    /// ```
    #[inline]
    #[must_use]
    pub fn key(&self) -> VertexKey {
        VertexKey([
            self.position.x.to_bits(),
            self.position.y.to_bits(),
            self.position.z.to_bits(),
        ])
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vertex {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::from_coords(x, y, z)
    }
}

//! Triangle polygons and the ordered mesh that holds them.

use crate::{FaceColor, Vertex};

/// A triangle face: three vertices in fixed winding order plus
/// optional shared attributes.
///
/// The attribute set is deliberately small and typed; today it holds
/// only an optional [`FaceColor`]. Adding an attribute means adding a
/// field here, not reintroducing an untyped map.
///
/// # Example
///
/// ```
/// use atlas_types::{FaceColor, Polygon, Vertex};
///
/// let tri = Polygon::new([
///     Vertex::from_coords(0.0, 0.0, 0.0),
///     Vertex::from_coords(1.0, 0.0, 0.0),
///     Vertex::from_coords(0.0, 1.0, 0.0),
/// ]);
/// assert!(tri.color.is_none());
/// assert_eq!(tri.color_or_default(), FaceColor::MID_GRAY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    /// The three corners, in winding order.
    pub vertices: [Vertex; 3],

    /// Shared face color, if assigned.
    pub color: Option<FaceColor>,
}

impl Polygon {
    /// Create an uncolored triangle.
    #[inline]
    #[must_use]
    pub const fn new(vertices: [Vertex; 3]) -> Self {
        Self {
            vertices,
            color: None,
        }
    }

    /// Create a triangle with a face color.
    #[inline]
    #[must_use]
    pub const fn with_color(vertices: [Vertex; 3], color: FaceColor) -> Self {
        Self {
            vertices,
            color: Some(color),
        }
    }

    /// The face color, falling back to [`FaceColor::MID_GRAY`].
    #[inline]
    #[must_use]
    pub fn color_or_default(&self) -> FaceColor {
        self.color.unwrap_or(FaceColor::MID_GRAY)
    }
}

/// An ordered sequence of triangles.
///
/// Order is significant: exporters emit per-polygon state (material
/// selection) in sequence and assign vertex indices by traversal
/// order, so the polygon order observed at decode time is preserved
/// end to end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonMesh {
    /// The polygons, in decode order.
    pub polygons: Vec<Polygon>,
}

impl PolygonMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated polygon capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(polygon_count: usize) -> Self {
        Self {
            polygons: Vec::with_capacity(polygon_count),
        }
    }

    /// Create a mesh from an existing polygon list.
    #[inline]
    #[must_use]
    pub const fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Number of polygons in the mesh.
    #[inline]
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Whether the mesh has no polygons.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Append a polygon.
    #[inline]
    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Iterate over polygons in order.
    pub fn iter(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.iter()
    }

    /// Assign one color to every polygon.
    ///
    /// This is how a whole decoded surface gets tagged before export;
    /// the raw strip format itself carries no color.
    pub fn set_color(&mut self, color: FaceColor) {
        for polygon in &mut self.polygons {
            polygon.color = Some(color);
        }
    }
}

impl<'a> IntoIterator for &'a PolygonMesh {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}

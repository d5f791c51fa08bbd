//! ASCII PLY export with per-face color.
//!
//! Writes the classic line-oriented PLY layout: format tag, element
//! declarations, then a vertex table in deduplication-index order
//! followed by one face line per polygon. Face lines carry the
//! explicit vertex count, **0-based** indices, and the face color
//! quantized to 8-bit channels by truncation.

use std::io::Write;
use std::path::Path;

use atlas_types::{PolygonMesh, VertexIndex};
use tracing::debug;

use crate::error::IoResult;
use crate::stage::{persist, stage};

/// Save a mesh as an ASCII colored-face PLY file.
///
/// `index` must have been collected from `mesh`; its insertion order
/// is the vertex table order, and face lines translate polygon
/// corners through it.
///
/// # Errors
///
/// Returns [`IoError::Io`](crate::IoError::Io) on write failure and
/// [`IoError::Index`](crate::IoError::Index) if `index` does not
/// cover every vertex of `mesh`. On any error the output path is not
/// touched.
///
/// # Example
///
/// ```no_run
/// use atlas_io::save_ply;
/// use atlas_types::{PolygonMesh, VertexIndex};
///
/// let mesh = PolygonMesh::new();
/// let index = VertexIndex::collect(&mesh);
/// save_ply(&mesh, &index, "surface.ply")?;
/// # Ok::<(), atlas_io::IoError>(())
/// ```
pub fn save_ply<P: AsRef<Path>>(
    mesh: &PolygonMesh,
    index: &VertexIndex,
    path: P,
) -> IoResult<()> {
    let path = path.as_ref();
    let mut out = Vec::new();

    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "comment Generated by atlas-io")?;
    writeln!(out, "element vertex {}", index.len())?;
    for axis in ["x", "y", "z"] {
        writeln!(out, "property float32 {axis}")?;
    }
    writeln!(out, "element face {}", mesh.polygon_count())?;
    writeln!(out, "property list uint8 int32 vertex_index")?;
    for channel in ["red", "green", "blue"] {
        writeln!(out, "property uchar {channel}")?;
    }
    writeln!(out, "end_header")?;

    for vertex in index.vertices() {
        writeln!(
            out,
            "{:.6} {:.6} {:.6}",
            vertex.position.x, vertex.position.y, vertex.position.z
        )?;
    }

    for polygon in mesh.iter() {
        write!(out, "{}", polygon.vertices.len())?;
        for vertex in &polygon.vertices {
            write!(out, " {}", index.index_of(vertex)?)?;
        }
        let (r, g, b) = polygon.color_or_default().quantize();
        writeln!(out, " {r} {g} {b}")?;
    }

    let staged = stage(path, &out)?;
    persist(staged, path)?;

    debug!(
        vertices = index.len(),
        faces = mesh.polygon_count(),
        path = %path.display(),
        "wrote colored-face ply"
    );
    Ok(())
}

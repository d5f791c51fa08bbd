//! Wavefront OBJ export with a material sidecar.
//!
//! The export produces two coupled artifacts: a `.mtl` file holding
//! one material block per distinct face color, and an OBJ geometry
//! file that references the sidecar by file name. Vertices are
//! written once, in deduplication-index order, and faces reference
//! them with **1-based** indices as the OBJ format requires.
//!
//! Both files are staged to temp paths and renamed into place only
//! after both have been fully written, so the pair is never left in
//! a half-readable state.

use std::io::Write;
use std::path::Path;

use atlas_types::{FaceColor, PolygonMesh, VertexIndex};
use hashbrown::HashSet;
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::stage::{persist, stage};

/// Deterministic material name built from the channels rounded to
/// two decimals, e.g. `color0.50_0.50_0.75`.
///
/// The geometry file's `usemtl` references resolve through these
/// names, so the same color always maps to the same material block.
fn material_name(color: FaceColor) -> String {
    format!("color{:.2}_{:.2}_{:.2}", color.r, color.g, color.b)
}

/// Distinct face colors in first-seen polygon order.
fn distinct_colors(mesh: &PolygonMesh) -> Vec<FaceColor> {
    let mut seen = HashSet::new();
    let mut colors = Vec::new();
    for polygon in mesh.iter() {
        let color = polygon.color_or_default();
        if seen.insert(color.key()) {
            colors.push(color);
        }
    }
    colors
}

/// Save a mesh as an OBJ geometry file plus a material sidecar.
///
/// `index` must have been collected from `mesh` (see
/// [`VertexIndex::collect`]); it supplies both the vertex table order
/// and the face index translation.
///
/// # Errors
///
/// Returns [`IoError::Io`] on write failure and
/// [`IoError::Index`] if `index` does not cover every vertex of
/// `mesh`. On any error neither output path is touched.
///
/// # Example
///
/// ```no_run
/// use atlas_io::save_obj;
/// use atlas_types::{PolygonMesh, VertexIndex};
///
/// let mesh = PolygonMesh::new();
/// let index = VertexIndex::collect(&mesh);
/// save_obj(&mesh, &index, "surface.obj", "colors.mtl")?;
/// # Ok::<(), atlas_io::IoError>(())
/// ```
pub fn save_obj<P: AsRef<Path>, Q: AsRef<Path>>(
    mesh: &PolygonMesh,
    index: &VertexIndex,
    obj_path: P,
    mtl_path: Q,
) -> IoResult<()> {
    let obj_path = obj_path.as_ref();
    let mtl_path = mtl_path.as_ref();

    let mtl_name = mtl_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| IoError::invalid_content("material path has no usable file name"))?;

    let mut mtl = Vec::new();
    for color in distinct_colors(mesh) {
        writeln!(mtl, "newmtl {}", material_name(color))?;
        writeln!(mtl, "Ka {:.6} {:.6} {:.6}", color.r, color.g, color.b)?;
        writeln!(mtl, "Kd {:.6} {:.6} {:.6}", color.r, color.g, color.b)?;
        writeln!(mtl, "illum 2")?;
        writeln!(mtl)?;
    }

    let mut obj = Vec::new();
    writeln!(obj, "# Generated by atlas-io")?;
    writeln!(obj, "mtllib {mtl_name}")?;

    for vertex in index.vertices() {
        writeln!(
            obj,
            "v {:.6} {:.6} {:.6}",
            vertex.position.x, vertex.position.y, vertex.position.z
        )?;
    }

    for polygon in mesh.iter() {
        writeln!(obj, "usemtl {}", material_name(polygon.color_or_default()))?;
        write!(obj, "f")?;
        for vertex in &polygon.vertices {
            // OBJ indices are 1-based.
            write!(obj, " {}", index.index_of(vertex)? + 1)?;
        }
        writeln!(obj)?;
    }

    // Stage both before persisting either; the pair appears together.
    let staged_mtl = stage(mtl_path, &mtl)?;
    let staged_obj = stage(obj_path, &obj)?;
    persist(staged_mtl, mtl_path)?;
    persist(staged_obj, obj_path)?;

    debug!(
        vertices = index.len(),
        faces = mesh.polygon_count(),
        path = %obj_path.display(),
        "wrote indexed obj"
    );
    Ok(())
}

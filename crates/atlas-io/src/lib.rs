//! Strip-mesh decoding and export for atlas surface data.
//!
//! This crate turns the proprietary triangle-strip binary surface
//! format into a [`PolygonMesh`](atlas_types::PolygonMesh) and
//! re-serializes it into two interchange encodings:
//!
//! - **OBJ** (Wavefront) with a material sidecar, 1-based indices
//! - **PLY** (ASCII) with per-face quantized color, 0-based indices
//!
//! Both exporters consume a prebuilt
//! [`VertexIndex`](atlas_types::VertexIndex) so coincident vertices
//! are written once and referenced by index.
//!
//! # Example
//!
//! ```no_run
//! use atlas_io::{load_strip_mesh, save_mesh};
//! use atlas_types::{FaceColor, VertexIndex};
//!
//! let mut mesh = load_strip_mesh("rawdata/180709942.aba")?;
//! mesh.set_color(FaceColor::new(0.8, 0.2, 0.2));
//!
//! let index = VertexIndex::collect(&mesh);
//! save_mesh(&mesh, &index, "180709942.obj")?; // sidecar at 180709942.mtl
//! save_mesh(&mesh, &index, "180709942.ply")?;
//! # Ok::<(), atlas_io::IoError>(())
//! ```
//!
//! # Error Handling
//!
//! Decode and export are all-or-nothing: a truncated buffer yields
//! [`IoError::UnexpectedEof`] with the failing byte offset and no
//! mesh; a failed export leaves no readable partial file (output is
//! staged to a temp path and renamed only on success).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod ply;
mod stage;
mod strip;

pub use error::{IoError, IoResult};
pub use obj::save_obj;
pub use ply::save_ply;
pub use strip::{decode_strip_mesh, load_strip_mesh};

use std::path::Path;

use atlas_types::{PolygonMesh, VertexIndex};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// OBJ (Wavefront) geometry with a `.mtl` material sidecar.
    Obj,
    /// PLY (Polygon File Format), ASCII with per-face color.
    Ply,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// The canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Ply => "ply",
        }
    }
}

/// Save a mesh to a file, detecting the format from the extension.
///
/// OBJ output places the material sidecar next to the geometry file,
/// at the same path with a `.mtl` extension.
///
/// # Errors
///
/// Returns [`IoError::UnknownFormat`] if the extension is not
/// recognized, otherwise whatever the selected exporter returns.
///
/// # Example
///
/// ```no_run
/// use atlas_io::save_mesh;
/// use atlas_types::{PolygonMesh, VertexIndex};
///
/// let mesh = PolygonMesh::new();
/// let index = VertexIndex::collect(&mesh);
/// save_mesh(&mesh, &index, "surface.ply")?;
/// # Ok::<(), atlas_io::IoError>(())
/// ```
pub fn save_mesh<P: AsRef<Path>>(
    mesh: &PolygonMesh,
    index: &VertexIndex,
    path: P,
) -> IoResult<()> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        MeshFormat::Obj => save_obj(mesh, index, path, path.with_extension("mtl")),
        MeshFormat::Ply => save_ply(mesh, index, path),
    }
}

//! Decoder for the raw triangle-strip surface format.
//!
//! # Binary Layout
//!
//! All integers and floats are little-endian:
//!
//! ```text
//! UINT32            – vertex record count
//! foreach vertex record
//!     REAL32[3]     – normal vector
//!     REAL32[3]     – position
//! end
//! UINT32            – strip count
//! foreach strip
//!     UINT16        – point count
//!     UINT32[count] – vertex record indices
//! end
//! ```
//!
//! Each strip of `k >= 3` points expands to `k - 2` triangles with
//! alternating winding, so face orientation stays consistent along
//! the strip. Strips with fewer than 3 points contribute nothing.
//!
//! Normals are parsed to advance the record layout but are not
//! attached to the produced mesh; only positions survive decoding.
//! Decoding is all-or-nothing: a truncated or inconsistent buffer
//! yields an error and no partial mesh.

use std::fs;
use std::path::Path;

use atlas_types::{Polygon, PolygonMesh, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Floats per vertex record (3 normal + 3 position).
const FLOATS_PER_RECORD: usize = 6;

/// Offset of the position lanes within a record.
const POSITION_OFFSET: usize = 3;

/// Bounds-checked little-endian cursor over a byte buffer.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Take the next `len` bytes, failing if the buffer is exhausted.
    fn take(&mut self, len: usize) -> IoResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or(IoError::UnexpectedEof {
                position: self.pos as u64,
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_u16(&mut self) -> IoResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> IoResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read `count` consecutive f32 values.
    fn read_f32_array(&mut self, count: usize) -> IoResult<Vec<f32>> {
        let len = count.checked_mul(4).ok_or(IoError::UnexpectedEof {
            position: self.pos as u64,
        })?;
        let bytes = self.take(len)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

/// The flat vertex record table, parsed once and accessed by stride.
///
/// Lanes `0..3` of each record hold the normal, lanes `3..6` the
/// position. Per-axis access strides over the single backing vec, so
/// no per-record copies are made.
struct RawVertexBuffer {
    floats: Vec<f32>,
}

impl RawVertexBuffer {
    fn parse(reader: &mut ByteReader<'_>, record_count: usize) -> IoResult<Self> {
        let count = record_count
            .checked_mul(FLOATS_PER_RECORD)
            .ok_or(IoError::UnexpectedEof {
                position: reader.pos as u64,
            })?;
        let floats = reader.read_f32_array(count)?;
        Ok(Self { floats })
    }

    fn record_count(&self) -> usize {
        self.floats.len() / FLOATS_PER_RECORD
    }

    fn position_axis(&self, record: usize, axis: usize) -> f64 {
        f64::from(self.floats[record * FLOATS_PER_RECORD + POSITION_OFFSET + axis])
    }

    /// The position of a record, or `None` if the index is out of range.
    fn position(&self, record: u32) -> Option<Vertex> {
        let record = record as usize;
        if record >= self.record_count() {
            return None;
        }
        Some(Vertex::from_coords(
            self.position_axis(record, 0),
            self.position_axis(record, 1),
            self.position_axis(record, 2),
        ))
    }
}

/// Decode a strip-mesh byte buffer into a polygon mesh.
///
/// Produced polygons carry no color; callers tag the mesh (e.g. with
/// [`PolygonMesh::set_color`]) before a colored export.
///
/// # Errors
///
/// Returns [`IoError::UnexpectedEof`] if any declared count is not
/// satisfiable by the remaining bytes, and [`IoError::InvalidContent`]
/// if a strip references a vertex record past the declared table. No
/// partial mesh is returned on failure.
///
/// # Example
///
/// ```no_run
/// use atlas_io::decode_strip_mesh;
///
/// let bytes = std::fs::read("surface.aba")?;
/// let mesh = decode_strip_mesh(&bytes)?;
/// println!("{} triangles", mesh.polygon_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_strip_mesh(bytes: &[u8]) -> IoResult<PolygonMesh> {
    let mut reader = ByteReader::new(bytes);

    let record_count = reader.read_u32()? as usize;
    let buffer = RawVertexBuffer::parse(&mut reader, record_count)?;

    let strip_count = reader.read_u32()?;
    let mut mesh = PolygonMesh::new();

    for _ in 0..strip_count {
        let point_count = reader.read_u16()? as usize;

        let mut points = Vec::with_capacity(point_count);
        for _ in 0..point_count {
            let record = reader.read_u32()?;
            let vertex = buffer.position(record).ok_or_else(|| {
                IoError::invalid_content(format!(
                    "strip references vertex record {record} but the table holds {} records",
                    buffer.record_count()
                ))
            })?;
            points.push(vertex);
        }

        // Alternating winding keeps face orientation consistent
        // across the strip.
        for i in 0..points.len().saturating_sub(2) {
            let corners = if i % 2 == 0 {
                [points[i], points[i + 1], points[i + 2]]
            } else {
                [points[i + 1], points[i], points[i + 2]]
            };
            mesh.push(Polygon::new(corners));
        }
    }

    debug!(
        records = record_count,
        strips = strip_count,
        triangles = mesh.polygon_count(),
        "decoded strip mesh"
    );
    Ok(mesh)
}

/// Load a strip-mesh file from disk and decode it.
///
/// The whole file is materialized before decoding; there is no
/// streaming path.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist, any
/// other read failure as [`IoError::Io`], and decode failures as in
/// [`decode_strip_mesh`].
pub fn load_strip_mesh<P: AsRef<Path>>(path: P) -> IoResult<PolygonMesh> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    decode_strip_mesh(&bytes)
}

//! End-to-end pipeline tests: raw strip bytes -> decode -> dedup ->
//! OBJ + PLY export.
//!
//! The fixtures are synthetic byte buffers built in the exact layout
//! of the raw surface format (little-endian, 6 floats per vertex
//! record with normals preceding positions).
//!
//! To run: cargo test -p atlas-io --test strip_pipeline

#![allow(clippy::unwrap_used, clippy::expect_used)]

use atlas_io::{decode_strip_mesh, save_mesh, IoError};
use atlas_types::{FaceColor, PolygonMesh, Vertex, VertexIndex};
use tempfile::tempdir;

/// Build a raw strip-mesh buffer from position records and strips.
/// Normal lanes are filled with a sentinel the decoder must skip.
fn encode(positions: &[[f32; 3]], strips: &[Vec<u32>]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&u32::try_from(positions.len()).unwrap().to_le_bytes());
    for p in positions {
        for lane in [-1.0_f32, -2.0, -3.0] {
            bytes.extend_from_slice(&lane.to_le_bytes());
        }
        for &axis in p {
            bytes.extend_from_slice(&axis.to_le_bytes());
        }
    }
    bytes.extend_from_slice(&u32::try_from(strips.len()).unwrap().to_le_bytes());
    for strip in strips {
        bytes.extend_from_slice(&u16::try_from(strip.len()).unwrap().to_le_bytes());
        for &index in strip {
            bytes.extend_from_slice(&index.to_le_bytes());
        }
    }
    bytes
}

/// A 5-point strip over 3 distinct positions: records 3 and 4 repeat
/// records 1 and 0 bit-for-bit.
fn shared_vertex_fixture() -> Vec<u8> {
    encode(
        &[
            [0.0, 0.0, 0.0], // A
            [1.0, 0.0, 0.0], // B
            [0.5, 1.0, 0.0], // C
            [1.0, 0.0, 0.0], // D == B
            [0.0, 0.0, 0.0], // E == A
        ],
        &[vec![0, 1, 2, 3, 4]],
    )
}

#[test]
fn decode_counts_are_consistent() {
    let mesh = decode_strip_mesh(&shared_vertex_fixture()).unwrap();

    assert_eq!(mesh.polygon_count(), 3);
    let corner_total: usize = mesh.iter().map(|p| p.vertices.len()).sum();
    assert_eq!(corner_total, 3 * mesh.polygon_count());
}

#[test]
fn shared_vertices_deduplicate_to_three_indices() {
    let mesh = decode_strip_mesh(&shared_vertex_fixture()).unwrap();
    let index = VertexIndex::collect(&mesh);

    assert_eq!(index.len(), 3);

    // The third triangle is built from D == B and E == A, so its
    // corners resolve to indices already assigned to A and B.
    let third = &mesh.polygons[2];
    let resolved: Vec<u32> = third
        .vertices
        .iter()
        .map(|v| index.index_of(v).unwrap())
        .collect();
    assert!(resolved.contains(&0)); // A
    assert!(resolved.contains(&1)); // B
    assert!(resolved.iter().all(|&i| i < 3));
}

#[test]
fn truncated_vertex_table_yields_no_mesh() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&10_u32.to_le_bytes());
    // Only 4 records' worth of floats.
    for _ in 0..(4 * 6) {
        bytes.extend_from_slice(&1.0_f32.to_le_bytes());
    }

    assert!(matches!(
        decode_strip_mesh(&bytes),
        Err(IoError::UnexpectedEof { .. })
    ));
}

#[test]
fn obj_export_is_indexed_and_one_based() {
    let mut mesh = decode_strip_mesh(&shared_vertex_fixture()).unwrap();
    mesh.set_color(FaceColor::new(0.8, 0.2, 0.2));
    let index = VertexIndex::collect(&mesh);

    let dir = tempdir().unwrap();
    let obj_path = dir.path().join("surface.obj");
    save_mesh(&mesh, &index, &obj_path).unwrap();

    let obj = std::fs::read_to_string(&obj_path).unwrap();
    let vertex_lines: Vec<&str> = obj.lines().filter(|l| l.starts_with("v ")).collect();
    let face_lines: Vec<&str> = obj.lines().filter(|l| l.starts_with("f ")).collect();

    assert_eq!(vertex_lines.len(), index.len());
    assert_eq!(face_lines.len(), mesh.polygon_count());

    for line in face_lines {
        for token in line[2..].split_whitespace() {
            let i: usize = token.parse().unwrap();
            assert!(i >= 1 && i <= index.len());
        }
    }

    // Sidecar landed next to the geometry file and is referenced by name.
    assert!(dir.path().join("surface.mtl").exists());
    assert!(obj.contains("mtllib surface.mtl"));
}

#[test]
fn ply_export_matches_declared_counts() {
    let mut mesh = decode_strip_mesh(&shared_vertex_fixture()).unwrap();
    mesh.set_color(FaceColor::new(0.25, 0.5, 0.75));
    let index = VertexIndex::collect(&mesh);

    let dir = tempdir().unwrap();
    let path = dir.path().join("surface.ply");
    save_mesh(&mesh, &index, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines.contains(&"element vertex 3"));
    assert!(lines.contains(&"element face 3"));

    let end = lines.iter().position(|&l| l == "end_header").unwrap();
    let body = &lines[end + 1..];
    assert_eq!(body.len(), 3 + 3);

    // Face lines: count, 0-based indices, 8-bit color channels.
    for face in &body[3..] {
        let tokens: Vec<&str> = face.split_whitespace().collect();
        assert_eq!(tokens[0], "3");
        for index_token in &tokens[1..4] {
            let i: usize = index_token.parse().unwrap();
            assert!(i < 3);
        }
        for channel in &tokens[4..] {
            let c: u32 = channel.parse().unwrap();
            assert!(c <= 255);
        }
        // Truncation: 0.25 -> 63, 0.5 -> 127, 0.75 -> 191
        assert_eq!(&tokens[4..], &["63", "127", "191"]);
    }
}

#[test]
fn exports_are_reproducible() {
    let mesh = decode_strip_mesh(&shared_vertex_fixture()).unwrap();
    let index = VertexIndex::collect(&mesh);

    let dir = tempdir().unwrap();
    let first = dir.path().join("a.ply");
    let second = dir.path().join("b.ply");
    save_mesh(&mesh, &index, &first).unwrap();
    save_mesh(&mesh, &index, &second).unwrap();

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn vertex_order_is_shared_between_exports() {
    let mesh = decode_strip_mesh(&shared_vertex_fixture()).unwrap();
    let index = VertexIndex::collect(&mesh);

    let dir = tempdir().unwrap();
    let obj_path = dir.path().join("surface.obj");
    let ply_path = dir.path().join("surface.ply");
    save_mesh(&mesh, &index, &obj_path).unwrap();
    save_mesh(&mesh, &index, &ply_path).unwrap();

    let obj = std::fs::read_to_string(&obj_path).unwrap();
    let ply = std::fs::read_to_string(&ply_path).unwrap();

    let obj_vertices: Vec<String> = obj
        .lines()
        .filter(|l| l.starts_with("v "))
        .map(|l| l[2..].to_owned())
        .collect();

    let end = ply.lines().position(|l| l == "end_header").unwrap();
    let ply_vertices: Vec<String> = ply
        .lines()
        .skip(end + 1)
        .take(index.len())
        .map(str::to_owned)
        .collect();

    assert_eq!(obj_vertices, ply_vertices);
}

#[test]
fn dedup_survives_multiple_strips() {
    // Two strips sharing an edge: records 1 and 2 appear in both.
    let bytes = encode(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [1.5, 1.0, 0.0],
        ],
        &[vec![0, 1, 2], vec![1, 3, 2]],
    );
    let mesh = decode_strip_mesh(&bytes).unwrap();
    assert_eq!(mesh.polygon_count(), 2);

    let index = VertexIndex::collect(&mesh);
    assert_eq!(index.len(), 4);

    // Bijection over the distinct identities.
    for i in 0..u32::try_from(index.len()).unwrap() {
        let vertex: Vertex = *index.vertex_at(i).unwrap();
        assert_eq!(index.index_of(&vertex).unwrap(), i);
    }
}

#[test]
fn empty_surface_round_trips() {
    let bytes = encode(&[], &[]);
    let mesh = decode_strip_mesh(&bytes).unwrap();
    assert!(mesh.is_empty());

    let index = VertexIndex::collect(&mesh);
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.ply");
    save_mesh(&mesh, &index, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("element vertex 0"));
    assert!(text.contains("element face 0"));
}

#[test]
fn decoded_mesh_is_uncolored_until_tagged() {
    let mesh = decode_strip_mesh(&shared_vertex_fixture()).unwrap();
    assert!(mesh.iter().all(|p| p.color.is_none()));

    let mut tagged = PolygonMesh::from_polygons(mesh.polygons);
    tagged.set_color(FaceColor::MID_GRAY);
    assert!(tagged.iter().all(|p| p.color == Some(FaceColor::MID_GRAY)));
}

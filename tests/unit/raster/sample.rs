use super::*;

const PX: f32 = 1.0 / 64.0;

fn vtx(x: f32, y: f32, depth: f32) -> MaskVertex {
    MaskVertex { pos: [x, y], depth }
}

fn depth(vertices: &[MaskVertex], faces: &[Face], xy: P2) -> f32 {
    let bounds = Bounds::from_points(vertices.iter().map(|v| v.pos)).unwrap();
    let grid = BucketGrid::build(vertices, faces, bounds, PX);
    depth_at(vertices, faces, &grid, bounds, xy)
}

fn band() -> (Vec<MaskVertex>, Vec<Face>) {
    // outline edge along y = 0.5, feather edge along y = 0.7
    let vertices = vec![
        vtx(0.2, 0.5, 0.0),
        vtx(0.8, 0.5, 0.0),
        vtx(0.8, 0.7, 1.0),
        vtx(0.2, 0.7, 1.0),
    ];
    (vertices, vec![Face::quad(0, 1, 2, 3)])
}

#[test]
fn triangle_interior_is_opaque() {
    let vertices = vec![vtx(0.2, 0.2, 0.0), vtx(0.8, 0.2, 0.0), vtx(0.5, 0.8, 0.0)];
    let faces = vec![Face::tri(0, 1, 2)];
    assert_eq!(depth(&vertices, &faces, [0.5, 0.4]), 0.0);
    // inside the bounds but outside the triangle
    assert_eq!(depth(&vertices, &faces, [0.25, 0.7]), 1.0);
    // outside the bounds
    assert_eq!(depth(&vertices, &faces, [0.9, 0.9]), 1.0);
    assert_eq!(depth(&vertices, &faces, [-3.0, 40.0]), 1.0);
}

#[test]
fn triangle_edges_are_inclusive() {
    let vertices = vec![vtx(0.2, 0.2, 0.0), vtx(0.8, 0.2, 0.0), vtx(0.5, 0.8, 0.0)];
    let faces = vec![Face::tri(0, 1, 2)];
    assert_eq!(depth(&vertices, &faces, [0.5, 0.2]), 0.0);
    assert_eq!(depth(&vertices, &faces, [0.2, 0.2]), 0.0);
}

#[test]
fn quad_depth_is_linear_across_the_band() {
    let (vertices, faces) = band();
    // below the a0-f1 diagonal
    assert!((depth(&vertices, &faces, [0.7, 0.55]) - 0.25).abs() < 1e-4);
    // above it
    assert!((depth(&vertices, &faces, [0.3, 0.65]) - 0.75).abs() < 1e-4);
    assert!(depth(&vertices, &faces, [0.5, 0.5]) < 1e-6);
    assert!((depth(&vertices, &faces, [0.5, 0.7]) - 1.0).abs() < 1e-6);
}

#[test]
fn quad_depth_is_monotone_toward_feather_edge() {
    let (vertices, faces) = band();
    let mut last = -1.0f32;
    for i in 0..=40 {
        let y = 0.5 + 0.2 * i as f32 / 40.0;
        let d = depth(&vertices, &faces, [0.43, y]);
        assert!((0.0..=1.0).contains(&d));
        assert!(d >= last - 1e-5, "y={y}: {d} < {last}");
        last = d;
    }
}

#[test]
fn overlapping_faces_keep_the_minimum() {
    let (mut vertices, mut faces) = band();
    // opaque triangle covering the left half of the band
    vertices.extend([vtx(0.1, 0.4, 0.0), vtx(0.5, 0.4, 0.0), vtx(0.1, 0.8, 0.0)]);
    faces.push(Face::tri(4, 5, 6));
    assert_eq!(depth(&vertices, &faces, [0.2, 0.6]), 0.0);
    assert!((depth(&vertices, &faces, [0.7, 0.55]) - 0.25).abs() < 1e-4);
}

#[test]
fn degenerate_cap_quad_ramps_radially() {
    let vertices = vec![vtx(0.5, 0.5, 0.0), vtx(0.6, 0.5, 1.0), vtx(0.5, 0.6, 1.0)];
    let faces = vec![Face::quad(0, 0, 1, 2)];
    assert!((depth(&vertices, &faces, [0.52, 0.52]) - 0.4).abs() < 1e-4);
    assert!(depth(&vertices, &faces, [0.5, 0.5]) < 1e-6);
}

#[test]
fn broken_indices_do_not_panic() {
    let vertices = vec![vtx(0.2, 0.2, 0.0), vtx(0.8, 0.2, 0.0), vtx(0.5, 0.8, 0.0)];
    let faces = vec![Face::tri(0, 1, 2)];
    let bounds = Bounds::from_points(vertices.iter().map(|v| v.pos)).unwrap();
    let grid = BucketGrid::build(&vertices, &faces, bounds, PX);

    // vertex list shorter than the face expects
    assert_eq!(depth_at(&vertices[..2], &faces, &grid, bounds, [0.5, 0.4]), 1.0);
    // bucket refers to a face that is not there
    assert_eq!(depth_at(&vertices, &[], &grid, bounds, [0.5, 0.4]), 1.0);
}

#[test]
fn non_finite_points_miss() {
    let (vertices, faces) = band();
    assert_eq!(depth(&vertices, &faces, [f32::NAN, 0.6]), 1.0);
    assert_eq!(depth(&vertices, &faces, [f32::INFINITY, 0.6]), 1.0);
}

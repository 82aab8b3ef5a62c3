use super::*;

fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<P2> {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
}

fn area(points: &[P2], res: &FillResult) -> f64 {
    res.triangles
        .iter()
        .map(|t| orient(points[t[0]], points[t[1]], points[t[2]]).abs() * 0.5)
        .sum()
}

#[test]
fn square_fills_with_two_triangles_and_four_boundary_edges() {
    let sq = square(0.0, 0.0, 1.0, 1.0);
    let res = fill_rings(&sq, &[]).unwrap();
    assert_eq!(res.triangles.len(), 2);
    assert_eq!(res.boundary, vec![[0, 1], [1, 2], [2, 3], [3, 0]]);
    assert!((area(&sq, &res) - 1.0).abs() < 1e-9);
}

#[test]
fn hole_is_excluded_from_area() {
    let outer = square(0.0, 0.0, 1.0, 1.0);
    let hole = square(0.25, 0.25, 0.75, 0.75);
    let res = fill_rings(&outer, &[&hole]).unwrap();

    let mut all = outer.clone();
    all.extend_from_slice(&hole);
    assert!((area(&all, &res) - 0.75).abs() < 1e-6);
    assert_eq!(res.boundary.len(), 8);
    assert!(res.boundary.contains(&[7, 4]));
}

#[test]
fn degenerate_rings_are_rejected() {
    assert_eq!(
        fill_rings(&[[0.0, 0.0], [1.0, 1.0]], &[]),
        Err(FillError::TooFewPoints)
    );
    let line = vec![[0.0, 0.0], [0.5, 0.5], [1.0, 1.0], [0.25, 0.25]];
    assert!(fill_rings(&line, &[]).is_err());
}

#[test]
fn group_rings_nests_by_parity() {
    let outer = square(0.0, 0.0, 1.0, 1.0);
    let hole = square(0.2, 0.2, 0.8, 0.8);
    let island = square(0.4, 0.4, 0.6, 0.6);
    let apart = square(2.0, 2.0, 3.0, 3.0);
    let rings: Vec<&[P2]> = vec![&outer, &hole, &island, &apart];

    let groups = group_rings(&rings);
    assert_eq!(groups.len(), 3);
    assert_eq!(
        groups[0],
        RingGroup {
            outer: 0,
            holes: vec![1]
        }
    );
    assert!(groups.iter().any(|g| g.outer == 2 && g.holes.is_empty()));
    assert!(groups.iter().any(|g| g.outer == 3 && g.holes.is_empty()));
}

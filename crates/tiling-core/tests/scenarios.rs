use std::collections::HashSet;

use tiling_core::{segments_coincide, EdgeRef, Tiling, TilingError, COINCIDENCE_EPSILON};

mod support;

use crate::support::{assert_invariants, build, circular_eq, State};

fn edge_set(tiling: &Tiling) -> HashSet<EdgeRef> {
    tiling.iter_boundary_edges().collect()
}

#[test]
fn seed_state() {
    let tiling = Tiling::new();
    assert!(tiling.is_empty());
    assert_eq!(tiling.boundary_len(), 1);
    assert_eq!(tiling.link_count(), 0);
    assert_eq!(tiling.iter_polygons().count(), 0);
}

#[test]
fn single_triangle() {
    let tiling = build(&[3]);
    let id = tiling.iter_polygons().next().unwrap().id();

    assert_eq!(tiling.boundary_len(), 3);
    assert!(tiling.iter_boundary_edges().all(|edge| edge.polygon == id));
    assert_eq!(tiling.link_count(), 0);
    assert_eq!(tiling.current_cursor_edge(), EdgeRef::new(id, 0));
    assert_invariants(&tiling);
}

#[test]
fn two_triangles_share_one_edge() {
    let tiling = build(&[3, 3]);
    let ids: Vec<_> = tiling.iter_polygons().map(|p| p.id()).collect();

    assert_eq!(tiling.link_count(), 2);
    assert_eq!(tiling.boundary_len(), 4);
    assert_eq!(
        tiling.partner(EdgeRef::new(ids[0], 0)),
        Some(EdgeRef::new(ids[1], 0))
    );
    assert_eq!(tiling.current_cursor_edge(), EdgeRef::new(ids[1], 1));
    assert_invariants(&tiling);
}

#[test]
fn triangle_fan_closes_into_a_hexagon() {
    let mut tiling = build(&[3, 3, 3, 3, 3]);
    let before = State::of(&tiling);
    assert_eq!(before.boundary.len(), 7);

    let last = tiling.add_polygon(3).unwrap();
    let ids: Vec<_> = tiling.iter_polygons().map(|p| p.id()).collect();

    // The sixth triangle meets the first one across the start of the fan.
    assert_eq!(tiling.partner(EdgeRef::new(last, 1)), Some(EdgeRef::new(ids[0], 2)));
    assert_eq!(tiling.partner(EdgeRef::new(last, 0)), Some(EdgeRef::new(ids[4], 1)));
    assert_eq!(tiling.link_count(), 12);

    let expected: HashSet<_> = [
        EdgeRef::new(ids[0], 1),
        EdgeRef::new(ids[1], 2),
        EdgeRef::new(ids[2], 2),
        EdgeRef::new(ids[3], 2),
        EdgeRef::new(ids[4], 2),
        EdgeRef::new(ids[5], 2),
    ]
    .into_iter()
    .collect();
    assert_eq!(edge_set(&tiling), expected);
    assert_eq!(tiling.current_cursor_edge(), EdgeRef::new(last, 2));
    assert_invariants(&tiling);

    tiling.remove_last_polygon().unwrap();
    let after = State::of(&tiling);
    assert!(after.same_as(&before), "{before:?}\n{after:?}");
}

#[test]
fn closing_through_the_right_seam() {
    let mut tiling = build(&[3, 3, 3, 3, 3]);
    let ids: Vec<_> = tiling.iter_polygons().map(|p| p.id()).collect();

    // Step back onto the first triangle and close the gap from the other side.
    tiling.retreat_cursor();
    assert_eq!(tiling.current_cursor_edge(), EdgeRef::new(ids[0], 2));
    let before = State::of(&tiling);

    let closer = tiling.add_polygon(3).unwrap();
    assert_eq!(tiling.partner(EdgeRef::new(closer, 0)), Some(EdgeRef::new(ids[0], 2)));
    assert_eq!(tiling.partner(EdgeRef::new(closer, 2)), Some(EdgeRef::new(ids[4], 1)));
    assert_eq!(tiling.boundary_len(), 6);
    assert_eq!(tiling.link_count(), 12);
    assert_eq!(tiling.current_cursor_edge(), EdgeRef::new(closer, 1));
    assert_invariants(&tiling);

    tiling.remove_last_polygon().unwrap();
    assert!(State::of(&tiling).same_as(&before));
}

#[test]
fn squares_around_a_vertex() {
    let mut tiling = build(&[4, 4]);
    // Lower square's left side, then walk around the shared vertex.
    tiling.add_polygon(4).unwrap();
    assert_eq!(tiling.boundary_len(), 8);
    tiling.add_polygon(4).unwrap();

    // The fourth square closes on the first: 4 squares, 4 shared edges.
    assert_eq!(tiling.link_count(), 8);
    assert_eq!(tiling.boundary_len(), 8);
    assert_invariants(&tiling);
}

#[test]
fn add_then_remove_twice_returns_to_seed() {
    let mut tiling = Tiling::new();
    for _ in 0..2 {
        tiling.add_polygon(3).unwrap();
        tiling.remove_last_polygon().unwrap();
    }
    assert_eq!(tiling.polygon_count(), 0);
    assert_eq!(tiling.boundary_len(), 1);
    assert_eq!(tiling.link_count(), 0);
    assert_invariants(&tiling);
}

#[test]
fn remove_on_empty_tiling_is_a_no_op() {
    let mut tiling = Tiling::new();
    let before = State::of(&tiling);
    assert_eq!(tiling.remove_last_polygon(), Ok(()));
    assert_eq!(State::of(&tiling), before);
}

#[test]
fn side_count_limits() {
    let mut tiling = Tiling::new();
    for sides in [0, 1, 2, 13, 100] {
        assert_eq!(
            tiling.add_polygon(sides),
            Err(TilingError::InvalidSideCount { sides, min: 3, max: 12 })
        );
    }
    for sides in 3..=12 {
        tiling.add_polygon(sides).unwrap();
        tiling.advance_cursor();
        assert_invariants(&tiling);
    }
    assert_eq!(tiling.polygon_count(), 10);
}

#[test]
fn coincidence_is_symmetric() {
    let tiling = build(&[6, 3, 3, 4, 12, 3, 5]);
    let edges: Vec<EdgeRef> = tiling
        .iter_polygons()
        .flat_map(|p| (0..p.sides()).map(move |i| EdgeRef::new(p.id(), i)))
        .collect();

    let mut glued = 0;
    for a in &edges {
        for b in &edges {
            let ab = segments_coincide(
                tiling.edge_segment(*a).unwrap(),
                tiling.edge_segment(*b).unwrap(),
                COINCIDENCE_EPSILON,
            );
            let ba = segments_coincide(
                tiling.edge_segment(*b).unwrap(),
                tiling.edge_segment(*a).unwrap(),
                COINCIDENCE_EPSILON,
            );
            assert_eq!(ab, ba, "{a} vs {b}");
            glued += usize::from(ab);
        }
    }
    // Every linked pair is geometrically coincident.
    assert!(glued >= tiling.link_count());
    for (a, b) in tiling.links() {
        assert!(segments_coincide(
            tiling.edge_segment(a).unwrap(),
            tiling.edge_segment(b).unwrap(),
            COINCIDENCE_EPSILON,
        ));
    }
}

#[test]
fn cursor_walks_the_whole_boundary() {
    let mut tiling = build(&[5, 7]);
    let start = tiling.current_cursor_edge();
    let boundary: Vec<_> = tiling.iter_boundary_edges().collect();

    let mut seen = Vec::new();
    for _ in 0..boundary.len() {
        seen.push(tiling.current_cursor_edge());
        tiling.advance_cursor();
    }
    assert_eq!(tiling.current_cursor_edge(), start);
    assert!(circular_eq(&seen, &boundary));

    tiling.retreat_cursor();
    assert_eq!(tiling.current_cursor_edge(), *seen.last().unwrap());
}

#[test]
fn removing_in_reverse_order_unwinds_everything() {
    let mut tiling = Tiling::new();
    let mut history = Vec::new();
    for (i, sides) in [4, 3, 6, 3, 4, 8, 3].into_iter().enumerate() {
        for _ in 0..i % 3 {
            tiling.advance_cursor();
        }
        history.push(State::of(&tiling));
        tiling.add_polygon(sides).unwrap();
        assert_invariants(&tiling);
    }

    while let Some(expected) = history.pop() {
        tiling.remove_last_polygon().unwrap();
        if tiling.is_empty() {
            // Back to a freshly seeded boundary; the seed id is new.
            assert!(history.is_empty());
            break;
        }
        assert!(State::of(&tiling).same_as(&expected));
        assert_invariants(&tiling);
    }
    assert!(tiling.is_empty());
    assert_eq!(tiling.boundary_len(), 1);
}

use sectornav_lib::{Error, GridTopology};

fn grid() -> GridTopology {
    GridTopology::new(33).expect("valid width")
}

#[test]
fn coords_round_trip_for_every_sector() {
    let g = grid();
    for sector in g.sectors() {
        let (col, row) = g.to_coords(sector);
        assert_eq!(g.to_sector(col, row), sector);
    }
}

#[test]
fn known_coordinate_values() {
    let g = grid();
    assert_eq!(g.to_coords(1), (0, 0));
    assert_eq!(g.to_coords(34), (0, 1));
    assert_eq!(g.to_coords(1089), (32, 32));
}

#[test]
fn chebyshev_is_zero_on_the_diagonal_and_symmetric() {
    let g = grid();
    for sector in g.sectors() {
        assert_eq!(g.chebyshev(sector, sector), 0);
    }
    for a in [1, 2, 33, 100, 501, 545, 1057, 1089] {
        for b in g.sectors() {
            assert_eq!(g.chebyshev(a, b), g.chebyshev(b, a));
        }
    }
}

#[test]
fn chebyshev_known_values() {
    let g = grid();
    assert_eq!(g.chebyshev(1, 3), 2);
    assert_eq!(g.chebyshev(1, 4), 3);
    assert_eq!(g.chebyshev(1, 33), 32);
    assert_eq!(g.chebyshev(1, 1057), 32);
    assert_eq!(g.chebyshev(1, 1089), 32);
}

#[test]
fn adjacency_known_values() {
    let g = grid();
    assert_eq!(g.adjacent_sectors(1, true), vec![2, 34, 35]);
    assert_eq!(g.adjacent_sectors(2, true), vec![1, 3, 34, 35, 36]);
    assert_eq!(g.adjacent_sectors(33, true), vec![32, 65, 66]);
    assert_eq!(
        g.adjacent_sectors(102, true),
        vec![68, 69, 70, 101, 103, 134, 135, 136]
    );
    assert_eq!(g.adjacent_sectors(1057, true), vec![1024, 1025, 1058]);
    assert_eq!(g.adjacent_sectors(1089, true), vec![1055, 1056, 1088]);
}

#[test]
fn diagonal_neighbour_counts_are_corner_edge_interior() {
    let g = grid();
    for sector in g.sectors() {
        let count = g.adjacent_sectors(sector, true).len();
        assert!(
            [3, 5, 8].contains(&count),
            "sector {sector} has {count} neighbours"
        );
    }
}

#[test]
fn orthogonal_neighbour_counts_are_corner_edge_interior() {
    let g = grid();
    for sector in g.sectors() {
        let count = g.adjacent_sectors(sector, false).len();
        assert!(
            [2, 3, 4].contains(&count),
            "sector {sector} has {count} neighbours"
        );
    }
}

#[test]
fn adjacent_sectors_are_at_chebyshev_one() {
    let g = grid();
    for sector in g.sectors() {
        for next in g.adjacent_sectors(sector, true) {
            assert_eq!(g.chebyshev(sector, next), 1);
        }
    }
}

#[test]
fn out_of_range_sectors_are_rejected() {
    let g = grid();
    assert!(matches!(
        g.check(0),
        Err(Error::SectorOutOfRange { sector: 0, .. })
    ));
    assert!(matches!(
        g.check(1090),
        Err(Error::SectorOutOfRange { sector: 1090, .. })
    ));
    assert!(g.check(1).is_ok());
    assert!(g.check(1089).is_ok());
}

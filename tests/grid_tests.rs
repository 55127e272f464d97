//! Grid tests - bounds safety and swap behaviour

use tile_rush::core::{CoreError, Grid};
use tile_rush::types::{CellPos, TileKind, GRID_COLS, GRID_ROWS};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(GRID_ROWS, GRID_COLS);
    assert_eq!(grid.rows(), GRID_ROWS);
    assert_eq!(grid.cols(), GRID_COLS);
    assert_eq!(grid.count_empty(), GRID_ROWS * GRID_COLS);

    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let pos = CellPos::new(row, col);
            assert!(grid.contains(pos), "{pos:?} should be inside");
            assert_eq!(grid.get(pos).unwrap(), None);
        }
    }
}

#[test]
fn test_every_out_of_range_access_fails() {
    let mut grid = Grid::new(GRID_ROWS, GRID_COLS);
    let outside = [
        CellPos::new(GRID_ROWS, 0),
        CellPos::new(0, GRID_COLS),
        CellPos::new(GRID_ROWS, GRID_COLS),
        CellPos::new(usize::MAX, 0),
    ];

    for pos in outside {
        assert!(!grid.contains(pos));
        assert!(matches!(grid.get(pos), Err(CoreError::OutOfBounds { .. })));
        assert!(grid.set(pos, Some(TileKind::Car)).is_err());
        assert!(grid.swap(CellPos::new(0, 0), pos).is_err());
    }
    assert!(grid.row_cells(GRID_ROWS).is_err());
    assert!(grid.column_cells(GRID_COLS).is_err());

    // Failed writes leave the grid untouched.
    assert_eq!(grid.count_empty(), GRID_ROWS * GRID_COLS);
}

#[test]
fn test_set_and_get() {
    let mut grid = Grid::new(3, 3);
    let pos = CellPos::new(1, 2);

    grid.set(pos, Some(TileKind::Train)).unwrap();
    assert_eq!(grid.get(pos).unwrap(), Some(TileKind::Train));
    assert_eq!(grid.count_kind(TileKind::Train), 1);

    grid.set(pos, None).unwrap();
    assert_eq!(grid.get(pos).unwrap(), None);
}

#[test]
fn test_swap_twice_restores_grid() {
    let mut grid = Grid::from_rows(vec![
        vec![Some(TileKind::Car), Some(TileKind::Bus), None],
        vec![Some(TileKind::Bike), Some(TileKind::Train), Some(TileKind::Scooter)],
    ])
    .unwrap();
    let before = grid.clone();

    let pairs = [
        (CellPos::new(0, 0), CellPos::new(0, 1)),
        (CellPos::new(0, 2), CellPos::new(1, 2)),
        (CellPos::new(1, 1), CellPos::new(1, 1)),
    ];
    for (a, b) in pairs {
        grid.swap(a, b).unwrap();
        grid.swap(a, b).unwrap();
        assert_eq!(grid, before);
    }
}

#[test]
fn test_swap_exchanges_contents() {
    let mut grid = Grid::from_rows(vec![vec![Some(TileKind::Car), None]]).unwrap();
    grid.swap(CellPos::new(0, 0), CellPos::new(0, 1)).unwrap();
    assert_eq!(grid.to_rows(), vec![vec![None, Some(TileKind::Car)]]);
}

#[test]
fn test_from_rows_rejects_bad_shapes() {
    assert!(Grid::from_rows(Vec::new()).is_err());
    assert!(Grid::from_rows(vec![Vec::new()]).is_err());
    assert!(Grid::from_rows(vec![vec![None, None], vec![None]]).is_err());
}

#[test]
fn test_column_cells_are_top_to_bottom() {
    let grid = Grid::from_rows(vec![
        vec![Some(TileKind::Car), None],
        vec![Some(TileKind::Bus), None],
        vec![None, Some(TileKind::Bike)],
    ])
    .unwrap();
    assert_eq!(
        grid.column_cells(0).unwrap(),
        vec![Some(TileKind::Car), Some(TileKind::Bus), None]
    );
    assert_eq!(grid.row_cells(2).unwrap(), &[None, Some(TileKind::Bike)]);
}

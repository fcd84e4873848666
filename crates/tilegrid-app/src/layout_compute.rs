// Grid placement: dense auto-flow of tile spans into a fixed-width grid.

use tilegrid_core::{CellSize, GridSpan, Rect, TileGrid, TileId};

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: TileId,
    pub column: u32,
    pub row: u32,
    pub span: GridSpan,
    pub rect: Rect,
}

/// Cell occupancy, grown one row at a time as tiles are placed.
struct Occupancy {
    columns: u32,
    rows: Vec<Vec<bool>>,
}

impl Occupancy {
    fn new(columns: u32) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    fn is_free(&self, column: u32, row: u32, span: GridSpan) -> bool {
        (row..row + span.rows).all(|r| {
            let Some(cells) = self.rows.get(r as usize) else {
                return true;
            };
            (column..column + span.columns).all(|c| !cells[c as usize])
        })
    }

    fn fill(&mut self, column: u32, row: u32, span: GridSpan) {
        let needed = (row + span.rows) as usize;
        while self.rows.len() < needed {
            self.rows.push(vec![false; self.columns as usize]);
        }
        for r in row..row + span.rows {
            for c in column..column + span.columns {
                self.rows[r as usize][c as usize] = true;
            }
        }
    }

    /// First free slot scanning rows top-down, columns left-right.
    fn first_fit(&self, span: GridSpan) -> (u32, u32) {
        let mut row = 0;
        loop {
            for column in 0..=(self.columns - span.columns) {
                if self.is_free(column, row, span) {
                    return (column, row);
                }
            }
            row += 1;
        }
    }
}

/// Place every tile of `grid` in order. Spans wider than the grid are
/// narrowed to fit. Rects use the tile's pixel size so a live drag tracks
/// the pointer rather than cell granularity.
pub fn place_tiles(grid: &dyn TileGrid, columns: u32, cell: CellSize, gap: f32) -> Vec<Placement> {
    let columns = columns.max(1);
    let mut occupancy = Occupancy::new(columns);
    let pitch_x = cell.width as f32 + gap;
    let pitch_y = cell.height as f32 + gap;

    grid.tile_ids()
        .iter()
        .map(|id| {
            let span = grid.span_for(id);
            let span = GridSpan::new(span.columns.min(columns), span.rows);
            let (column, row) = occupancy.first_fit(span);
            occupancy.fill(column, row, span);

            let size = grid.size_for(id);
            let rect = Rect::new(
                gap + column as f32 * pitch_x,
                gap + row as f32 * pitch_y,
                size.width as f32,
                size.height as f32,
            );
            Placement {
                id: id.clone(),
                column,
                row,
                span,
                rect,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tilegrid_core::{Size, Vec2};

    /// Fixed spans, no resizing.
    struct StaticGrid {
        ids: Vec<TileId>,
        spans: HashMap<TileId, GridSpan>,
    }

    impl StaticGrid {
        fn new(tiles: &[(&str, u32, u32)]) -> Self {
            Self {
                ids: tiles.iter().map(|t| t.0.to_string()).collect(),
                spans: tiles
                    .iter()
                    .map(|&(id, c, r)| (id.to_string(), GridSpan::new(c, r)))
                    .collect(),
            }
        }
    }

    impl TileGrid for StaticGrid {
        fn tile_ids(&self) -> &[TileId] {
            &self.ids
        }
        fn size_for(&self, tile: &str) -> Size {
            let span = self.span_for(tile);
            Size::new(span.columns as i32 * 157, span.rows as i32 * 120)
        }
        fn span_for(&self, tile: &str) -> GridSpan {
            self.spans.get(tile).copied().unwrap_or(GridSpan::new(1, 1))
        }
        fn start_resize(&mut self, _tile: &str, _position: Vec2) {}
        fn drag_to(&mut self, _position: Vec2) {}
        fn finish_resize(&mut self) {}
    }

    const CELL: CellSize = CellSize::new(157, 120);

    fn positions(placements: &[Placement]) -> Vec<(&str, u32, u32)> {
        placements
            .iter()
            .map(|p| (p.id.as_str(), p.column, p.row))
            .collect()
    }

    #[test]
    fn unit_tiles_flow_row_by_row() {
        let grid = StaticGrid::new(&[("a", 1, 1), ("b", 1, 1), ("c", 1, 1), ("d", 1, 1), ("e", 1, 1)]);
        let placed = place_tiles(&grid, 4, CELL, 8.0);
        assert_eq!(
            positions(&placed),
            vec![("a", 0, 0), ("b", 1, 0), ("c", 2, 0), ("d", 3, 0), ("e", 0, 1)]
        );
    }

    #[test]
    fn dense_flow_backfills_holes() {
        // b is too wide for the rest of row 0, c backfills the hole left behind a.
        let grid = StaticGrid::new(&[("a", 2, 1), ("b", 3, 1), ("c", 1, 1), ("d", 1, 1)]);
        let placed = place_tiles(&grid, 4, CELL, 8.0);
        assert_eq!(
            positions(&placed),
            vec![("a", 0, 0), ("b", 0, 1), ("c", 2, 0), ("d", 3, 0)]
        );
    }

    #[test]
    fn tall_tiles_reserve_rows() {
        let grid = StaticGrid::new(&[("a", 1, 2), ("b", 2, 1), ("c", 2, 1), ("d", 1, 1)]);
        let placed = place_tiles(&grid, 3, CELL, 0.0);
        assert_eq!(
            positions(&placed),
            vec![("a", 0, 0), ("b", 1, 0), ("c", 1, 1), ("d", 0, 2)]
        );
    }

    #[test]
    fn oversized_span_is_narrowed() {
        let grid = StaticGrid::new(&[("wide", 5, 1), ("next", 1, 1)]);
        let placed = place_tiles(&grid, 2, CELL, 0.0);
        assert_eq!(placed[0].span, GridSpan::new(2, 1));
        assert_eq!(positions(&placed), vec![("wide", 0, 0), ("next", 0, 1)]);
    }

    #[test]
    fn rects_use_pitch_and_pixel_size() {
        let grid = StaticGrid::new(&[("a", 1, 1), ("b", 2, 2)]);
        let placed = place_tiles(&grid, 4, CELL, 8.0);
        assert_eq!(placed[0].rect, Rect::new(8.0, 8.0, 157.0, 120.0));
        assert_eq!(placed[1].rect, Rect::new(8.0 + 165.0, 8.0, 314.0, 240.0));
    }

    #[test]
    fn empty_grid_places_nothing() {
        let grid = StaticGrid::new(&[]);
        assert!(place_tiles(&grid, 4, CELL, 8.0).is_empty());
    }
}

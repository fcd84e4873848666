use tilegrid_core::Size;

use crate::catalog::TileSpec;
use crate::layout_compute::Placement;

// ──────────────────────────────────────────────
// Tile labels
// ──────────────────────────────────────────────

const CELL_CHARS: usize = 6;
const HANDLE_MARK: &str = "<resize>";

pub(crate) fn tile_label(catalog: &[TileSpec], id: &str) -> String {
    catalog
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.label.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Label squeezed into one grid cell.
fn cell_label(label: &str) -> String {
    let short: String = label.chars().take(CELL_CHARS).collect();
    format!("{:<width$}", short, width = CELL_CHARS)
}

// ──────────────────────────────────────────────
// Text rendering
// ──────────────────────────────────────────────

pub(crate) struct GridView<'a> {
    pub catalog: &'a [TileSpec],
    pub columns: u32,
    /// Tile whose resize handle is under the pointer; its size line is marked.
    pub hovered_handle: Option<&'a str>,
}

/// Draw the placed grid as text: one bracketed cell per grid cell, named by
/// the tile covering it, followed by a per-tile size listing.
pub(crate) fn render_grid(
    view: &GridView<'_>,
    placements: &[Placement],
    sizes: impl Fn(&str) -> Size,
) -> String {
    let catalog = view.catalog;
    let columns = view.columns.max(1) as usize;
    let rows = placements
        .iter()
        .map(|p| (p.row + p.span.rows) as usize)
        .max()
        .unwrap_or(0);

    let mut cells: Vec<Vec<Option<usize>>> = vec![vec![None; columns]; rows];
    for (index, p) in placements.iter().enumerate() {
        for r in p.row..p.row + p.span.rows {
            for c in p.column..p.column + p.span.columns {
                if let Some(slot) = cells
                    .get_mut(r as usize)
                    .and_then(|row| row.get_mut(c as usize))
                {
                    *slot = Some(index);
                }
            }
        }
    }

    let mut out = String::new();
    for row in &cells {
        for cell in row {
            let text = match cell {
                Some(index) => cell_label(&tile_label(catalog, &placements[*index].id)),
                None => " ".repeat(CELL_CHARS),
            };
            out.push('[');
            out.push_str(&text);
            out.push(']');
        }
        out.push('\n');
    }

    for p in placements {
        let size = sizes(&p.id);
        out.push_str(&format!(
            "{:<16} {}x{} cells  {}x{} px",
            tile_label(catalog, &p.id),
            p.span.columns,
            p.span.rows,
            size.width,
            size.height
        ));
        if view.hovered_handle == Some(p.id.as_str()) {
            out.push(' ');
            out.push_str(HANDLE_MARK);
        }
        out.push('\n');
    }
    out
}

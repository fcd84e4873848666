use tilegrid_core::{CellSize, GridSpan, Size};

// ──────────────────────────────────────────────
// Default metrics
// ──────────────────────────────────────────────

pub const MIN_WIDTH: i32 = 157;
pub const MAX_WIDTH: i32 = 314;
pub const MIN_HEIGHT: i32 = 120;
pub const MAX_HEIGHT: i32 = 240;
pub const CELL_SIZE: CellSize = CellSize::new(157, 120);

/// Size bounds plus the cell size they snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
    pub cell: CellSize,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            min_width: MIN_WIDTH,
            max_width: MAX_WIDTH,
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,
            cell: CELL_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("cell size must be positive, got {width}x{height}")]
    NonPositiveCell { width: i32, height: i32 },
    #[error("{axis} bounds are inverted: min {min} > max {max}")]
    InvertedBounds { axis: &'static str, min: i32, max: i32 },
    #[error("no whole multiple of the {cell}px cell fits {axis} bounds [{min}, {max}]")]
    NoCellFits { axis: &'static str, cell: i32, min: i32, max: i32 },
}

// ──────────────────────────────────────────────
// Pure grid math
// ──────────────────────────────────────────────

/// Whole cells covered by `length`, rounding half away from zero, never below one.
fn cells(length: i32, cell: i32) -> u32 {
    let n = (f64::from(length) / f64::from(cell)).round();
    if n < 1.0 {
        1
    } else {
        n as u32
    }
}

/// Convert a pixel size to whole grid spans.
pub fn to_span(size: Size, cell: CellSize) -> GridSpan {
    GridSpan::new(cells(size.width, cell.width), cells(size.height, cell.height))
}

/// Round a pixel size to the nearest whole-cell multiple. Idempotent.
pub fn snap_to_grid(size: Size, cell: CellSize) -> Size {
    from_span(to_span(size, cell), cell)
}

fn from_span(span: GridSpan, cell: CellSize) -> Size {
    Size::new(
        (span.columns as i32).saturating_mul(cell.width),
        (span.rows as i32).saturating_mul(cell.height),
    )
}

/// Range of whole cell counts whose pixel length lies in `[min, max]`.
fn cell_range(min: i32, max: i32, cell: i32) -> (u32, u32) {
    let lo = (min + cell - 1).div_euclid(cell).max(1);
    let hi = max.div_euclid(cell);
    (lo as u32, hi.max(0) as u32)
}

// ──────────────────────────────────────────────
// GeometryPolicy
// ──────────────────────────────────────────────

/// Validated grid metrics. Every size handed out by the engine passes
/// through `clamp` (live) or `snap` (committed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryPolicy {
    metrics: GridMetrics,
    columns: (u32, u32),
    rows: (u32, u32),
}

impl GeometryPolicy {
    pub fn new(metrics: GridMetrics) -> Result<Self, GeometryError> {
        let cell = metrics.cell;
        if cell.width <= 0 || cell.height <= 0 {
            return Err(GeometryError::NonPositiveCell {
                width: cell.width,
                height: cell.height,
            });
        }
        let columns = Self::axis("width", metrics.min_width, metrics.max_width, cell.width)?;
        let rows = Self::axis("height", metrics.min_height, metrics.max_height, cell.height)?;
        Ok(Self { metrics, columns, rows })
    }

    fn axis(axis: &'static str, min: i32, max: i32, cell: i32) -> Result<(u32, u32), GeometryError> {
        if min > max {
            return Err(GeometryError::InvertedBounds { axis, min, max });
        }
        let (lo, hi) = cell_range(min, max, cell);
        if lo > hi {
            return Err(GeometryError::NoCellFits { axis, cell, min, max });
        }
        Ok((lo, hi))
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn cell(&self) -> CellSize {
        self.metrics.cell
    }

    /// Size shown for a tile that has never been resized.
    pub fn default_size(&self) -> Size {
        Size::new(self.metrics.min_width, self.metrics.min_height)
    }

    pub fn clamp(&self, size: Size) -> Size {
        let m = &self.metrics;
        Size::new(
            size.width.clamp(m.min_width, m.max_width),
            size.height.clamp(m.min_height, m.max_height),
        )
    }

    pub fn to_span(&self, size: Size) -> GridSpan {
        to_span(size, self.metrics.cell)
    }

    /// Snap to the grid, keeping the result within bounds. With the default
    /// metrics this is exactly `snap_to_grid`.
    pub fn snap(&self, size: Size) -> Size {
        let span = self.to_span(size);
        let bounded = GridSpan::new(
            span.columns.clamp(self.columns.0, self.columns.1),
            span.rows.clamp(self.rows.0, self.rows.1),
        );
        from_span(bounded, self.metrics.cell)
    }

    /// True if `size` is a value `snap` could have produced.
    pub fn is_settled(&self, size: Size) -> bool {
        self.snap(self.clamp(size)) == size
    }
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        let metrics = GridMetrics::default();
        Self {
            metrics,
            columns: cell_range(metrics.min_width, metrics.max_width, metrics.cell.width),
            rows: cell_range(metrics.min_height, metrics.max_height, metrics.cell.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> impl Iterator<Item = Size> {
        (-400..=900).step_by(7).flat_map(|w| (-300..=700).step_by(11).map(move |h| Size::new(w, h)))
    }

    #[test]
    fn clamp_is_idempotent() {
        let policy = GeometryPolicy::default();
        for s in sizes() {
            let once = policy.clamp(s);
            assert_eq!(policy.clamp(once), once);
        }
    }

    #[test]
    fn clamp_respects_bounds() {
        let policy = GeometryPolicy::default();
        assert_eq!(policy.clamp(Size::new(500, 10)), Size::new(314, 120));
        assert_eq!(policy.clamp(Size::new(-20, 999)), Size::new(157, 240));
        assert_eq!(policy.clamp(Size::new(200, 180)), Size::new(200, 180));
    }

    #[test]
    fn snap_is_idempotent() {
        for s in sizes() {
            let once = snap_to_grid(s, CELL_SIZE);
            assert_eq!(snap_to_grid(once, CELL_SIZE), once, "size {:?}", s);
        }
    }

    #[test]
    fn bounded_snap_is_idempotent() {
        let policy = GeometryPolicy::default();
        for s in sizes() {
            let once = policy.snap(s);
            assert_eq!(policy.snap(once), once);
        }
    }

    #[test]
    fn span_is_monotonic_in_each_axis() {
        let mut prev = 0;
        for w in -200..=1000 {
            let span = to_span(Size::new(w, 120), CELL_SIZE);
            assert!(span.columns >= prev, "columns dropped at width {}", w);
            prev = span.columns;
        }
        let mut prev = 0;
        for h in -200..=1000 {
            let span = to_span(Size::new(157, h), CELL_SIZE);
            assert!(span.rows >= prev, "rows dropped at height {}", h);
            prev = span.rows;
        }
    }

    #[test]
    fn span_never_below_one() {
        assert_eq!(to_span(Size::new(0, 0), CELL_SIZE), GridSpan::new(1, 1));
        assert_eq!(to_span(Size::new(-500, -500), CELL_SIZE), GridSpan::new(1, 1));
        assert_eq!(to_span(Size::new(50, 40), CELL_SIZE), GridSpan::new(1, 1));
    }

    #[test]
    fn span_rounds_half_up() {
        // 235.5 would be the exact midpoint of 157; 236/157 = 1.503 -> 2, 235/157 = 1.497 -> 1
        assert_eq!(to_span(Size::new(235, 120), CELL_SIZE).columns, 1);
        assert_eq!(to_span(Size::new(236, 120), CELL_SIZE).columns, 2);
        // 180/120 = 1.5 exactly
        assert_eq!(to_span(Size::new(157, 180), CELL_SIZE).rows, 2);
        assert_eq!(to_span(Size::new(157, 179), CELL_SIZE).rows, 1);
    }

    #[test]
    fn default_size_spans_one_cell() {
        let policy = GeometryPolicy::default();
        assert_eq!(policy.default_size(), Size::new(157, 120));
        assert_eq!(policy.to_span(policy.default_size()), GridSpan::new(1, 1));
    }

    #[test]
    fn default_policy_matches_validated_defaults() {
        assert_eq!(GeometryPolicy::new(GridMetrics::default()).unwrap(), GeometryPolicy::default());
    }

    #[test]
    fn bounded_snap_matches_plain_snap_under_defaults() {
        let policy = GeometryPolicy::default();
        for s in sizes() {
            let clamped = policy.clamp(s);
            assert_eq!(policy.snap(clamped), snap_to_grid(clamped, CELL_SIZE));
        }
    }

    #[test]
    fn bounded_snap_stays_within_custom_bounds() {
        let metrics = GridMetrics {
            min_width: 100,
            max_width: 250,
            min_height: 100,
            max_height: 400,
            cell: CellSize::new(100, 100),
        };
        let policy = GeometryPolicy::new(metrics).unwrap();
        // 250 rounds to 3 cells (300px) but only 2 fit under 250
        assert_eq!(policy.snap(policy.clamp(Size::new(260, 400))), Size::new(200, 400));
    }

    #[test]
    fn rejects_invalid_metrics() {
        let mut m = GridMetrics::default();
        m.cell = CellSize::new(0, 120);
        assert!(matches!(GeometryPolicy::new(m), Err(GeometryError::NonPositiveCell { .. })));

        let mut m = GridMetrics::default();
        m.min_width = 400;
        assert!(matches!(GeometryPolicy::new(m), Err(GeometryError::InvertedBounds { axis: "width", .. })));

        let mut m = GridMetrics::default();
        m.min_height = 130;
        m.max_height = 200;
        assert!(matches!(GeometryPolicy::new(m), Err(GeometryError::NoCellFits { axis: "height", .. })));
    }

    #[test]
    fn is_settled_only_for_snapped_sizes() {
        let policy = GeometryPolicy::default();
        assert!(policy.is_settled(Size::new(314, 240)));
        assert!(policy.is_settled(Size::new(157, 120)));
        assert!(!policy.is_settled(Size::new(237, 200)));
        assert!(!policy.is_settled(Size::new(471, 120)));
    }
}

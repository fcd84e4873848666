use std::collections::HashMap;

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Pointer position in the same pixel space as rendered output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A tile's pixel size. Whole pixels; may be negative only as an
/// unclamped intermediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// The fixed unit of grid granularity that pixel sizes snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: i32,
    pub height: i32,
}

impl CellSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A tile's footprint in whole grid cells. Always derived from a `Size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpan {
    pub columns: u32,
    pub rows: u32,
}

impl GridSpan {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type TileId = String;

/// Committed per-tile sizes. Insertion order is irrelevant.
pub type LayoutMap = HashMap<TileId, Size>;

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Vec2 },
    PointerMove { position: Vec2 },
    PointerUp { position: Vec2 },
    /// Tile activation, delivered by the host after a press/release pair.
    Click { position: Vec2 },
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents could not be (de)serialized: {0}")]
    Serialize(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// ──────────────────────────────────────────────
// Trait: KeyValueStore
// ──────────────────────────────────────────────

/// Durable string key-value storage the layout is persisted into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

// ──────────────────────────────────────────────
// Trait: Navigator
// ──────────────────────────────────────────────

/// Invoked once per tile activation with the tile's target.
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

// ──────────────────────────────────────────────
// Trait: TileGrid
// ──────────────────────────────────────────────

/// The tile grid assigns sizes and spans to tiles and mediates drag-resize.
/// Rendering only ever reads through `size_for` / `span_for`.
pub trait TileGrid {
    fn tile_ids(&self) -> &[TileId];
    fn size_for(&self, tile: &str) -> Size;
    fn span_for(&self, tile: &str) -> GridSpan;
    fn start_resize(&mut self, tile: &str, position: Vec2);
    fn drag_to(&mut self, position: Vec2);
    fn finish_resize(&mut self);
}

// Input router
// Hit-tests pointer events against tile rects and decides whether they resize
// a tile or activate it.

use tilegrid_core::{InputEvent, Rect, TileId, Vec2};

/// Default edge length of the square resize handle at each tile's bottom-right corner.
pub const DEFAULT_HANDLE_SIZE: f32 = 16.0;

// ──────────────────────────────────────────────
// Action types
// ──────────────────────────────────────────────

/// What the host should do in response to an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Pointer pressed on a tile's resize handle.
    BeginResize(TileId, Vec2),
    /// Pointer moved during a resize.
    DragResize(Vec2),
    /// Pointer released during a resize.
    EndResize,
    /// Tile activated (navigate to its target).
    Activate(TileId),
    /// No action to take.
    None,
}

// ──────────────────────────────────────────────
// Router
// ──────────────────────────────────────────────

pub struct Router {
    /// Tile whose resize handle is being dragged.
    resizing: Option<TileId>,
    /// Tile whose next activation is swallowed because a resize just ended on it.
    suppressed: Option<TileId>,
    hovered_handle: Option<TileId>,
    handle_size: f32,
}

impl Router {
    pub fn new() -> Self {
        Self::with_handle_size(DEFAULT_HANDLE_SIZE)
    }

    pub fn with_handle_size(handle_size: f32) -> Self {
        Self {
            resizing: None,
            suppressed: None,
            hovered_handle: None,
            handle_size: handle_size.max(1.0),
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing.is_some()
    }

    pub fn resizing(&self) -> Option<&str> {
        self.resizing.as_deref()
    }

    /// Tile whose resize handle is under the pointer (for cursor feedback).
    pub fn hovered_handle(&self) -> Option<&str> {
        self.hovered_handle.as_deref()
    }

    /// Drop all drag state, e.g. when the hosting view goes away.
    pub fn cancel(&mut self) {
        self.resizing = None;
        self.suppressed = None;
        self.hovered_handle = None;
    }

    pub fn process(&mut self, event: InputEvent, tile_rects: &[(TileId, Rect)]) -> Action {
        match event {
            InputEvent::PointerDown { position } => self.process_down(position, tile_rects),
            InputEvent::PointerMove { position } => self.process_move(position, tile_rects),
            InputEvent::PointerUp { .. } => self.process_up(),
            InputEvent::Click { position } => self.process_click(position, tile_rects),
        }
    }

    // ── Pointer down ────────────────────────────

    fn process_down(&mut self, position: Vec2, tile_rects: &[(TileId, Rect)]) -> Action {
        self.suppressed = None;
        let stale = self.resizing.take();

        if let Some(id) = self.handle_at(position, tile_rects) {
            // A missed pointer-up is finalized by the engine when the new resize begins.
            self.resizing = Some(id.clone());
            return Action::BeginResize(id, position);
        }

        match stale {
            Some(active) => {
                log::debug!("Pointer down off a handle while resizing {:?}, ending resize", active);
                Action::EndResize
            }
            None => Action::None,
        }
    }

    // ── Pointer move ────────────────────────────

    fn process_move(&mut self, position: Vec2, tile_rects: &[(TileId, Rect)]) -> Action {
        if self.resizing.is_some() {
            return Action::DragResize(position);
        }
        self.hovered_handle = self.handle_at(position, tile_rects);
        Action::None
    }

    // ── Pointer up ──────────────────────────────

    fn process_up(&mut self) -> Action {
        match self.resizing.take() {
            Some(id) => {
                self.suppressed = Some(id);
                Action::EndResize
            }
            None => Action::None,
        }
    }

    // ── Click ───────────────────────────────────

    fn process_click(&mut self, position: Vec2, tile_rects: &[(TileId, Rect)]) -> Action {
        if self.resizing.is_some() {
            return Action::None;
        }

        let Some(id) = self.tile_at(position, tile_rects) else {
            return Action::None;
        };

        if self.suppressed.as_deref() == Some(id.as_str()) {
            self.suppressed = None;
            log::debug!("Activation of {:?} suppressed after resize", id);
            return Action::None;
        }
        Action::Activate(id)
    }

    // ── Hit testing ─────────────────────────────

    /// Topmost tile containing the point. Later rects are drawn over earlier ones.
    fn hit<'a>(&self, position: Vec2, tile_rects: &'a [(TileId, Rect)]) -> Option<&'a (TileId, Rect)> {
        tile_rects.iter().rev().find(|(_, rect)| rect.contains(position))
    }

    fn tile_at(&self, position: Vec2, tile_rects: &[(TileId, Rect)]) -> Option<TileId> {
        self.hit(position, tile_rects).map(|(id, _)| id.clone())
    }

    fn handle_at(&self, position: Vec2, tile_rects: &[(TileId, Rect)]) -> Option<TileId> {
        let (id, rect) = self.hit(position, tile_rects)?;
        let size = self.handle_size.min(rect.width).min(rect.height);
        let handle = Rect::new(
            rect.x + rect.width - size,
            rect.y + rect.height - size,
            size,
            size,
        );
        handle.contains(position).then(|| id.clone())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

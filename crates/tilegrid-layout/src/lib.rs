// Tile layout engine
// Implements tilegrid_core::TileGrid over a per-tile size map persisted through LayoutStore

pub mod geometry;
pub mod session;
pub mod store;

use tilegrid_core::{GridSpan, LayoutMap, Size, TileGrid, TileId, Vec2};

pub use geometry::{GeometryError, GeometryPolicy, GridMetrics};
pub use session::{ResizeSession, ResizeState};
pub use store::LayoutStore;

// ──────────────────────────────────────────────
// TileLayoutEngine
// ──────────────────────────────────────────────

/// Owns the layout map for one launcher session. Rendering reads spans and
/// sizes; only a finished resize (or an explicit reset) writes to the store.
pub struct TileLayoutEngine {
    tiles: Vec<TileId>,
    policy: GeometryPolicy,
    store: LayoutStore,
    /// Committed, snapped sizes. Mirrors what was last persisted.
    committed: LayoutMap,
    /// Clamped sizes of the tile currently being dragged.
    live: LayoutMap,
    state: ResizeState,
    torn_down: bool,
}

impl TileLayoutEngine {
    pub fn new(
        tile_ids: impl IntoIterator<Item = TileId>,
        mut store: LayoutStore,
        policy: GeometryPolicy,
    ) -> Self {
        let mut tiles: Vec<TileId> = Vec::new();
        for id in tile_ids {
            if !tiles.contains(&id) {
                tiles.push(id);
            }
        }

        let mut committed = store.load();
        for (id, size) in committed.iter_mut() {
            if !policy.is_settled(*size) {
                let settled = policy.snap(policy.clamp(*size));
                log::warn!(
                    "Stored size {}x{} for tile {:?} is off-grid; using {}x{}",
                    size.width,
                    size.height,
                    id,
                    settled.width,
                    settled.height
                );
                *size = settled;
            }
        }

        Self {
            tiles,
            policy,
            store,
            committed,
            live: LayoutMap::new(),
            state: ResizeState::Idle,
            torn_down: false,
        }
    }

    pub fn policy(&self) -> &GeometryPolicy {
        &self.policy
    }

    /// The committed layout map (what a reload would restore).
    pub fn layout(&self) -> &LayoutMap {
        &self.committed
    }

    pub fn contains(&self, tile: &str) -> bool {
        self.tiles.iter().any(|id| id == tile)
    }

    pub fn committed_size(&self, tile: &str) -> Option<Size> {
        self.committed.get(tile).copied()
    }

    pub fn is_resizing(&self) -> bool {
        self.state.is_active()
    }

    pub fn active_tile(&self) -> Option<&str> {
        self.state.session().map(|s| s.tile.as_str())
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Forget a tile's stored size so it falls back to the default.
    pub fn reset_tile(&mut self, tile: &str) {
        if self.torn_down {
            log::debug!("reset_tile({:?}) after teardown ignored", tile);
            return;
        }
        if self.active_tile() == Some(tile) {
            log::debug!("Discarding in-progress resize of {:?} for reset", tile);
            self.state = ResizeState::Idle;
            self.live.remove(tile);
        }
        if self.committed.remove(tile).is_some() {
            self.store.save(&self.committed);
        }
    }

    /// Forget every stored size and remove the persisted record.
    pub fn reset_all(&mut self) {
        if self.torn_down {
            log::debug!("reset_all after teardown ignored");
            return;
        }
        self.state = ResizeState::Idle;
        self.live.clear();
        self.committed.clear();
        self.store.clear();
    }

    /// Finalize any in-progress drag (snap + persist) and stop accepting input.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if self.state.is_active() {
            log::debug!("Finalizing in-progress resize on teardown");
            self.finish_resize();
        }
        self.torn_down = true;
    }
}

impl Drop for TileLayoutEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl TileGrid for TileLayoutEngine {
    fn tile_ids(&self) -> &[TileId] {
        &self.tiles
    }

    fn size_for(&self, tile: &str) -> Size {
        self.live
            .get(tile)
            .or_else(|| self.committed.get(tile))
            .copied()
            .unwrap_or_else(|| self.policy.default_size())
    }

    fn span_for(&self, tile: &str) -> GridSpan {
        self.policy.to_span(self.size_for(tile))
    }

    fn start_resize(&mut self, tile: &str, position: Vec2) {
        if self.torn_down {
            log::debug!("start_resize({:?}) after teardown ignored", tile);
            return;
        }
        if !self.contains(tile) {
            log::debug!("start_resize on unknown tile {:?} ignored", tile);
            return;
        }
        if let Some(active) = self.active_tile() {
            log::debug!("start_resize({:?}) while resizing {:?}; finalizing it first", tile, active);
            self.finish_resize();
        }

        let start_size = self.size_for(tile);
        self.state = ResizeState::Active(ResizeSession::begin(tile.to_string(), position, start_size));
    }

    fn drag_to(&mut self, position: Vec2) {
        let ResizeState::Active(ref session) = self.state else {
            log::debug!("drag_to with no active resize ignored");
            return;
        };
        let size = session.live_size(position, &self.policy);
        self.live.insert(session.tile.clone(), size);
    }

    fn finish_resize(&mut self) {
        let session = match std::mem::replace(&mut self.state, ResizeState::Idle) {
            ResizeState::Active(session) => session,
            ResizeState::Idle => {
                log::debug!("finish_resize with no active resize ignored");
                return;
            }
        };

        let live = self.live.remove(&session.tile).unwrap_or(session.start_size);
        let size = session.commit_size(live, &self.policy);
        self.committed.insert(session.tile, size);
        self.store.save(&self.committed);
    }
}

// Launcher: wires the layout engine, input router and navigator together for one role.

use tilegrid_core::{InputEvent, KeyValueStore, Navigator, Rect, TileGrid, TileId};
use tilegrid_input::{Action, Router};
use tilegrid_layout::{LayoutStore, TileLayoutEngine};

use crate::catalog::{self, TileSpec};
use crate::layout_compute::{self, Placement};
use crate::settings::LauncherSettings;
use crate::ui;

/// Navigator that reports the target on stdout.
pub struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&mut self, target: &str) {
        log::info!("Navigating to {}", target);
        println!("-> {}", target);
    }
}

pub struct Launcher {
    role: String,
    catalog: &'static [TileSpec],
    engine: TileLayoutEngine,
    router: Router,
    navigator: Box<dyn Navigator>,
    columns: u32,
    gap: f32,
}

impl Launcher {
    pub fn new(
        role: &str,
        settings: &LauncherSettings,
        backend: Box<dyn KeyValueStore>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let catalog = catalog::tiles_for_role(role);
        let store = LayoutStore::with_key(backend, settings.storage_key.clone());
        let engine = TileLayoutEngine::new(
            catalog.iter().map(|t| t.id.to_string()),
            store,
            settings.grid.policy(),
        );

        Self {
            role: role.to_string(),
            catalog,
            engine,
            router: Router::with_handle_size(settings.handle_size),
            navigator,
            columns: settings.grid.columns(),
            gap: settings.grid.gap.max(0.0),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn engine(&self) -> &TileLayoutEngine {
        &self.engine
    }

    pub fn placements(&self) -> Vec<Placement> {
        layout_compute::place_tiles(&self.engine, self.columns, self.engine.policy().cell(), self.gap)
    }

    pub fn tile_rects(&self) -> Vec<(TileId, Rect)> {
        self.placements().into_iter().map(|p| (p.id, p.rect)).collect()
    }

    pub fn render(&self) -> String {
        let grid = ui::GridView {
            catalog: self.catalog,
            columns: self.columns,
            hovered_handle: self.router.hovered_handle(),
        };
        ui::render_grid(&grid, &self.placements(), |id| self.engine.size_for(id))
    }

    /// Route one pointer event and carry out the resulting action.
    pub fn handle_event(&mut self, event: InputEvent) -> Action {
        if self.engine.is_torn_down() {
            log::debug!("Event after shutdown ignored: {:?}", event);
            return Action::None;
        }

        let rects = self.tile_rects();
        let action = self.router.process(event, &rects);
        if action != Action::EndResize && !self.router.is_resizing() {
            self.commit_orphaned_resize();
        }
        match &action {
            Action::BeginResize(tile, position) => self.engine.start_resize(tile, *position),
            Action::DragResize(position) => self.engine.drag_to(*position),
            Action::EndResize => self.engine.finish_resize(),
            Action::Activate(tile) => self.activate(tile),
            Action::None => {}
        }
        action
    }

    /// Commit an engine drag the router no longer tracks.
    fn commit_orphaned_resize(&mut self) {
        if let Some(tile) = self.engine.active_tile() {
            log::debug!("Committing resize of {:?} after routing lost it", tile);
            self.engine.finish_resize();
        }
    }

    fn activate(&mut self, tile: &str) {
        match self.catalog.iter().find(|t| t.id == tile) {
            Some(spec) => self.navigator.navigate(spec.target),
            None => log::debug!("Activation of unknown tile {:?} ignored", tile),
        }
    }

    /// Reset one tile, or every tile when `tile` is `None`.
    /// A drag in progress is committed first.
    pub fn reset(&mut self, tile: Option<&str>) {
        self.router.cancel();
        self.commit_orphaned_resize();
        match tile {
            Some(tile) => self.engine.reset_tile(tile),
            None => self.engine.reset_all(),
        }
    }

    /// Tear down the hosting view. An in-progress drag is committed.
    pub fn shutdown(&mut self) {
        self.router.cancel();
        self.engine.teardown();
    }
}

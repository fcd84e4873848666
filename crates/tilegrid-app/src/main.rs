mod catalog;
mod launcher;
mod layout_compute;
mod script;
mod settings;
mod ui;

use std::io::BufRead;

use tilegrid_core::KeyValueStore;
use tilegrid_store::{FileStore, MemoryStore};

use launcher::{Launcher, StdoutNavigator};
use script::Command;
use settings::LauncherSettings;

fn open_store(settings: &LauncherSettings) -> Box<dyn KeyValueStore> {
    let store = match &settings.storage_path {
        Some(path) => Some(FileStore::new(path)),
        None => FileStore::default_location(),
    };
    match store {
        Some(store) => {
            log::debug!("Persisting layout to {}", store.path().display());
            Box::new(store)
        }
        None => {
            log::warn!("Could not determine data directory; layout will not survive restart");
            Box::new(MemoryStore::new())
        }
    }
}

// ──────────────────────────────────────────────
// Entry point
// ──────────────────────────────────────────────

fn main() {
    env_logger::init();

    let settings = settings::load_settings();
    let role = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings.default_role.clone());

    let mut launcher = Launcher::new(
        &role,
        &settings,
        open_store(&settings),
        Box::new(StdoutNavigator),
    );
    print!("{}", launcher.render());

    let stdin = std::io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };

        match script::parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Event(event))) => {
                let was_resizing = launcher.engine().is_resizing();
                launcher.handle_event(event);
                if was_resizing && !launcher.engine().is_resizing() {
                    print!("{}", launcher.render());
                }
            }
            Ok(Some(Command::Show)) => print!("{}", launcher.render()),
            Ok(Some(Command::Reset(tile))) => {
                launcher.reset(tile.as_deref());
                print!("{}", launcher.render());
            }
            Ok(Some(Command::Quit)) => break,
            Err(e) => log::warn!("line {}: {}", index + 1, e),
        }
    }

    launcher.shutdown();
    log::debug!("Launcher for role {:?} shut down", launcher.role());
}

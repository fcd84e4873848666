// Key-value storage backends
// Implements tilegrid_core::KeyValueStore in memory and over a JSON file

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

mod backend;
mod error;
mod file;
mod persister;

pub use backend::HistoryBackend;
pub use file::FileBackend;
pub use persister::{spawn_writer, Persister};

pub mod app;
pub mod clock;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod streak;
pub mod theme;
pub mod ui;

pub use app::router;
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{AppError, StoreError};
pub use state::AppState;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, resolve_data_dir};
pub use store::ActivityStore;

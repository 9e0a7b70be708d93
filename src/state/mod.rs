//! Application state transitions and persistence
//!
//! User actions are dispatched as explicit commands against an `AppState`
//! value, and the resulting state is handed to a `StateStore`.

pub mod commands;
pub mod storage;

// Re-export commonly used types
pub use commands::{apply, Command};
pub use storage::{InMemoryStateStore, JsonFileStateStore, MockStateStore, StateStore};

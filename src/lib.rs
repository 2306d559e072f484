pub mod config;
pub mod model;
pub mod practicum;
pub mod telegram;
pub mod watcher;

//! Live config reload manager.
//!
//! Combines the file watcher with config loading and validation so a
//! running renderer can pick up edits to `config.toml`.

mod manager;


pub use manager::ReloadManager;

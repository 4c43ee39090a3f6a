//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop: window and GPU setup, asynchronous asset loading, config
//! reload, pointer input, and frame scheduling.

mod core;
mod event_handler;
mod init;
mod input;
mod polling;
mod shutdown;

pub use core::MarbleApp;

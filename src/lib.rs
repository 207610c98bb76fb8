//! subsearch library - Interactive substance search
//!
//! This library exposes the core functionality of subsearch for testing purposes.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod search;

#[cfg(test)]
pub mod test_utils;
pub mod theme;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::Config;

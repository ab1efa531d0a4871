//! Utility functions.
//!
//! This module provides helpers for clipboard and system-opener operations
//! and the table layout configuration.

mod clipboard;
mod layout_config;

pub use clipboard::{copy_to_clipboard, open_external};
pub use layout_config::TableLayoutConfig;

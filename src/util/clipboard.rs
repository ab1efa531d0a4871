//! Clipboard and system-opener integration.

use crate::error::{CsvPeekError, Result};
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Hand a URL or file path to the desktop's default application.
pub fn open_external(target: &str) -> Result<()> {
    tracing::info!("Opening {} externally", target);
    open::that(target).map_err(|e| CsvPeekError::launch(target, e))
}

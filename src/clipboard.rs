//! System clipboard access.

use crate::error::ClipboardError;
use std::sync::Mutex;

pub type ClipboardResult = Result<(), ClipboardError>;

/// Destination for copied text.
#[allow(async_fn_in_trait)]
pub trait ClipboardSink {
    async fn write_text(&self, text: &str) -> ClipboardResult;
}

/// Clipboard backed by the platform clipboard through `arboard`.
///
/// The handle is opened on first write and kept, so selections owned by this
/// process stay available after the write returns.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    async fn write_text(&self, text: &str) -> ClipboardResult {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard handle poisoned".into()))?;
        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new()?);
        }
        let Some(clipboard) = guard.as_mut() else {
            return Err(ClipboardError::Unavailable("clipboard not opened".into()));
        };
        if let Err(err) = clipboard.set_text(text.to_owned()) {
            // Reopen on the next attempt; the handle may belong to a dead session.
            *guard = None;
            return Err(err.into());
        }
        tracing::debug!(bytes = text.len(), "wrote clipboard text");
        Ok(())
    }
}

use crate::capture::{CaptureResult, Rasterizer};
use crate::clipboard::{ClipboardResult, ClipboardSink};
use crate::error::{CaptureError, ClipboardError};
use crate::ui::frame::Frame;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Rasterizer that replays queued results and counts calls.
#[derive(Default)]
pub struct ScriptedRasterizer {
    results: RefCell<VecDeque<CaptureResult>>,
    pub calls: Cell<usize>,
    pub last_region: RefCell<Option<Frame>>,
}

impl ScriptedRasterizer {
    pub fn returning(results: Vec<CaptureResult>) -> Self {
        Self {
            results: RefCell::new(results.into()),
            ..Self::default()
        }
    }
}

impl Rasterizer for ScriptedRasterizer {
    async fn rasterize(&self, region: &Frame) -> CaptureResult {
        self.calls.set(self.calls.get() + 1);
        *self.last_region.borrow_mut() = Some(region.clone());
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(CaptureError::Render("script exhausted".into())))
    }
}

/// Clipboard that records writes and can be told to refuse them.
#[derive(Default)]
pub struct RecordingClipboard {
    pub writes: RefCell<Vec<String>>,
    pub deny: Cell<bool>,
}

impl ClipboardSink for RecordingClipboard {
    async fn write_text(&self, text: &str) -> ClipboardResult {
        if self.deny.get() {
            return Err(ClipboardError::Denied("document is not focused".into()));
        }
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

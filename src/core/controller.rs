use crate::capture::{Artifact, CaptureResult, Rasterizer};
use crate::clipboard::{ClipboardResult, ClipboardSink};
use crate::core::form_state::FormState;
use crate::core::form_values::{Field, FormValues, FormVariant};
use crate::core::validation::{self, ValidationErrors};
use crate::error::CaptureError;
use crate::ui::frame::Frame;

pub const SCREENSHOT_COPIED: &str = "Screenshot copied to clipboard!";
pub const ARTIFACT_COPIED: &str = "Base64 image copied to clipboard!";

/// Where a submission cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Capturing,
    Captured,
    ClipboardWriting,
    Done,
    CaptureFailed,
    ClipboardFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Message the host must show and have acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }
}

/// Per-stage results of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport {
    pub capture: CaptureResult,
    /// `None` when capture failed and no write was attempted.
    pub clipboard: Option<ClipboardResult>,
    pub final_phase: SubmitPhase,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Invalid(ValidationErrors),
    Submitted(SubmitReport),
}

/// Owns form state and drives the capture-and-copy pipeline.
pub struct FormController<R, C> {
    state: FormState,
    rasterizer: R,
    clipboard: C,
    region: Option<Frame>,
    artifact: Option<Artifact>,
    phase: SubmitPhase,
    last_phase: SubmitPhase,
}

impl<R, C> FormController<R, C>
where
    R: Rasterizer,
    C: ClipboardSink,
{
    pub fn new(variant: FormVariant, rasterizer: R, clipboard: C) -> Self {
        Self {
            state: FormState::new(variant),
            rasterizer,
            clipboard,
            region: None,
            artifact: None,
            phase: SubmitPhase::Idle,
            last_phase: SubmitPhase::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &FormValues {
        self.state.values()
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.state.errors()
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Terminal phase of the most recent cycle, `Idle` before the first one.
    pub fn last_phase(&self) -> SubmitPhase {
        self.last_phase
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn set_field_value(&mut self, path: &str, value: impl Into<String>) {
        let Some(field) = Field::from_path(path) else {
            tracing::debug!(%path, "ignoring value for unknown field");
            return;
        };
        if !self.state.set_value(field, value) {
            tracing::debug!(%path, "field not present in this form variant");
        }
    }

    pub fn set_field_touched(&mut self, path: &str) {
        self.state.set_touched(path);
    }

    pub fn touch_all(&mut self) {
        self.state.touch_all();
    }

    pub fn validate(values: &FormValues) -> ValidationErrors {
        validation::validate(values)
    }

    fn enter(&mut self, phase: SubmitPhase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "submit phase");
        self.phase = phase;
    }

    /// Records the drawn form region that a submission captures.
    pub fn mount_region(&mut self, region: Frame) {
        self.region = Some(region);
    }

    pub fn unmount_region(&mut self) {
        self.region = None;
    }

    /// Validates and, when clean, submits.
    ///
    /// Re-entry is ruled out by the `&mut self` borrow held across the
    /// awaits; hosts disable their trigger from request to completion.
    pub async fn try_submit(&mut self) -> SubmitOutcome {
        self.enter(SubmitPhase::Validating);
        self.state.touch_all();
        let errors = self.state.revalidate().clone();
        if !errors.is_empty() {
            tracing::info!(errors = errors.len(), "submission blocked by validation");
            self.last_phase = SubmitPhase::Invalid;
            self.enter(SubmitPhase::Idle);
            return SubmitOutcome::Invalid(errors);
        }
        let values = self.state.values().clone();
        SubmitOutcome::Submitted(self.submit(&values).await)
    }

    /// Captures the mounted region, stores it, then copies it to the clipboard.
    ///
    /// Callers are expected to have validated `values` first.
    pub async fn submit(&mut self, values: &FormValues) -> SubmitReport {
        self.state.set_submitting(true);
        tracing::info!(name = %values.name, email = %values.email, "submitting form");

        self.enter(SubmitPhase::Capturing);
        let capture = match self.region.as_ref() {
            Some(region) => self.rasterizer.rasterize(region).await,
            None => Err(CaptureError::Unmounted),
        };

        let report = match &capture {
            Err(err) => {
                tracing::error!(error = %err, "error converting form to image");
                self.enter(SubmitPhase::CaptureFailed);
                SubmitReport {
                    capture: capture.clone(),
                    clipboard: None,
                    final_phase: SubmitPhase::CaptureFailed,
                    notice: Notice::failure(format!("Could not capture the form: {err}")),
                }
            }
            Ok(artifact) => {
                self.enter(SubmitPhase::Captured);
                self.artifact = Some(artifact.clone());

                self.enter(SubmitPhase::ClipboardWriting);
                let clipboard = self.clipboard.write_text(artifact.as_str()).await;
                let (final_phase, notice) = match &clipboard {
                    Ok(()) => (SubmitPhase::Done, Notice::success(SCREENSHOT_COPIED)),
                    Err(err) => {
                        tracing::error!(error = %err, "error copying screenshot to clipboard");
                        (
                            SubmitPhase::ClipboardFailed,
                            Notice::failure(format!(
                                "Screenshot captured, but copying it to the clipboard failed: {err}"
                            )),
                        )
                    }
                };
                self.enter(final_phase);
                SubmitReport {
                    capture: capture.clone(),
                    clipboard: Some(clipboard),
                    final_phase,
                    notice,
                }
            }
        };

        tracing::info!(phase = ?report.final_phase, "submission finished");
        self.last_phase = report.final_phase;
        self.enter(SubmitPhase::Idle);
        self.state.set_submitting(false);
        report
    }

    /// Copies the stored artifact again. `None` when nothing has been captured.
    pub async fn copy_artifact(&mut self) -> Option<Notice> {
        let artifact = self.artifact.as_ref()?;
        match self.clipboard.write_text(artifact.as_str()).await {
            Ok(()) => Some(Notice::success(ARTIFACT_COPIED)),
            Err(err) => {
                tracing::error!(error = %err, "failed to copy text to clipboard");
                Some(Notice::failure(format!(
                    "Failed to copy text to clipboard: {err}"
                )))
            }
        }
    }
}

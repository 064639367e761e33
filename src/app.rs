use crate::capture::Rasterizer;
use crate::clipboard::ClipboardSink;
use crate::config::AppConfig;
use crate::core::controller::{FormController, SubmitOutcome};
use crate::core::form_values::Field;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers, Terminal, TerminalSize};
use crate::ui::frame::Frame;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::artifact_view::ArtifactView;
use crate::widgets::button::Button;
use crate::widgets::input_field::{InputField, InputMode, InputType};
use crate::widgets::notice::NoticeModal;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};
use std::io;

const SUBMIT_ID: &str = "submit";
const COPY_ID: &str = "copy";
const ARTIFACT_ID: &str = "artifact";
const SUBMIT_TEXT: &str = "Submit and Copy Screenshot";
const COPY_TEXT: &str = "Copy Base64 Image";
const OUTPUT_HEADING: &str = "Base64 Screenshot:";
const HELP: &str = "Tab/Shift+Tab move  Enter submit  Ctrl+T show/hide password  Esc quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Submit,
    Copy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Field(usize),
    Submit,
    Artifact,
    Copy,
}

/// Single-page form: fields, submit button and, once captured, the artifact view.
pub struct App<R, C> {
    controller: FormController<R, C>,
    runtime: tokio::runtime::Runtime,
    title: String,
    class_prefix: Option<String>,
    theme: Theme,
    fields: Vec<InputField>,
    submit: Button,
    copy: Button,
    artifact_view: ArtifactView,
    focus: Focus,
    notice: Option<NoticeModal>,
    pending: Option<Pending>,
    size: TerminalSize,
    should_exit: bool,
}

impl<R, C> App<R, C>
where
    R: Rasterizer,
    C: ClipboardSink,
{
    pub fn new(config: &AppConfig, rasterizer: R, clipboard: C) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        let fields = config
            .variant
            .fields()
            .iter()
            .map(|field| {
                let input = build_field(*field);
                match config.hint(*field) {
                    Some(hint) => input.with_hint(hint),
                    None => input,
                }
            })
            .collect();

        Ok(Self {
            controller: FormController::new(config.variant, rasterizer, clipboard),
            runtime,
            title: config.title.clone(),
            class_prefix: config.class_prefix.clone(),
            theme: Theme::default_theme(),
            fields,
            submit: Button::new(SUBMIT_ID, SUBMIT_TEXT),
            copy: Button::new(COPY_ID, COPY_TEXT),
            artifact_view: ArtifactView::new(ARTIFACT_ID, OUTPUT_HEADING),
            focus: Focus::Field(0),
            notice: None,
            pending: None,
            size: TerminalSize {
                width: 80,
                height: 24,
            },
            should_exit: false,
        })
    }

    pub fn controller(&self) -> &FormController<R, C> {
        &self.controller
    }

    pub fn notice(&self) -> Option<&NoticeModal> {
        self.notice.as_ref()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn resize(&mut self, size: TerminalSize) {
        self.size = size;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }

        if let Some(modal) = self.notice.as_mut() {
            modal.on_key(key);
            if modal.is_dismissed() {
                self.notice = None;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_exit = true;
                return;
            }
            KeyCode::Tab => {
                self.move_focus(1);
                return;
            }
            KeyCode::BackTab => {
                self.move_focus(-1);
                return;
            }
            _ => {}
        }

        let result = self.dispatch(key);
        if result.handled {
            for action in result.actions {
                self.apply_action(action);
            }
            return;
        }

        match key.code {
            KeyCode::Down => self.move_focus(1),
            KeyCode::Up => self.move_focus(-1),
            // Enter inside a field submits the form, as a browser would.
            KeyCode::Enter if matches!(self.focus, Focus::Field(_)) => self.request_submit(),
            _ => {}
        }
    }

    fn dispatch(&mut self, key: KeyEvent) -> InteractionResult {
        match self.focus {
            Focus::Field(idx) => self
                .fields
                .get_mut(idx)
                .map(|field| field.on_key(key))
                .unwrap_or_default(),
            Focus::Submit => self.submit.on_key(key),
            Focus::Artifact => self.artifact_view.on_key(key),
            Focus::Copy => self.copy.on_key(key),
        }
    }

    fn apply_action(&mut self, action: WidgetAction) {
        match action {
            WidgetAction::ValueChanged { field, value } => {
                self.controller.set_field_value(&field, value);
            }
            WidgetAction::Activated { id } if id == SUBMIT_ID => self.request_submit(),
            WidgetAction::Activated { id } if id == COPY_ID => self.pending = Some(Pending::Copy),
            WidgetAction::Activated { id } => tracing::debug!(%id, "unhandled activation"),
        }
    }

    fn request_submit(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.blur_focused_field();
        self.pending = Some(Pending::Submit);
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<Focus> = (0..self.fields.len()).map(Focus::Field).collect();
        order.push(Focus::Submit);
        if self.controller.artifact().is_some() {
            order.push(Focus::Artifact);
            order.push(Focus::Copy);
        }
        order
    }

    fn move_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(order.len() as isize) as usize;
        self.blur_focused_field();
        self.focus = order[next];
    }

    fn blur_focused_field(&mut self) {
        if let Focus::Field(idx) = self.focus
            && let Some(field) = self.fields.get(idx)
        {
            self.controller.set_field_touched(field.name());
        }
    }

    fn focused_id(&self) -> Option<&str> {
        match self.focus {
            Focus::Field(idx) => self.fields.get(idx).map(|f| f.id()),
            Focus::Submit => Some(SUBMIT_ID),
            Focus::Artifact => Some(ARTIFACT_ID),
            Focus::Copy => Some(COPY_ID),
        }
    }

    /// Runs a submission or copy requested by the last key, after the
    /// disabled submit button has been drawn.
    pub fn run_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending {
            Pending::Submit => {
                let outcome = self.runtime.block_on(self.controller.try_submit());
                match outcome {
                    SubmitOutcome::Invalid(errors) => {
                        let first_invalid = self
                            .fields
                            .iter()
                            .position(|field| errors.get(field.name()).is_some());
                        if let Some(idx) = first_invalid {
                            self.focus = Focus::Field(idx);
                        }
                    }
                    SubmitOutcome::Submitted(report) => {
                        if let Some(artifact) = self.controller.artifact() {
                            self.artifact_view.set_text(artifact.as_str());
                        }
                        self.notice = Some(NoticeModal::new(report.notice));
                    }
                }
            }
            Pending::Copy => {
                if let Some(notice) = self.runtime.block_on(self.controller.copy_artifact()) {
                    self.notice = Some(NoticeModal::new(notice));
                }
            }
        }
    }

    /// Lays out the page and mounts the field block as the capture region.
    pub fn compose(&mut self) -> (Frame, Option<CursorPos>) {
        self.submit
            .set_disabled(self.pending == Some(Pending::Submit));

        let focused = self.focused_id().map(str::to_string);
        let ctx = RenderContext {
            focused_id: focused.as_deref(),
            bindings: self.controller.state(),
            theme: &self.theme,
            class_prefix: self.class_prefix.as_deref(),
            width: self.size.width,
        };

        let mut page = Frame::new();
        let mut cursor = None;
        page.push_line(vec![
            Span::new("  "),
            Span::styled(self.title.clone(), ctx.class_style("heading")),
        ]);
        page.push_line(Vec::new());

        let region_top = page.height() as u16;
        let mut region = Frame::new();
        for field in &self.fields {
            place(&mut region, &mut cursor, field.draw(&ctx));
        }
        if let Some(pos) = cursor.as_mut() {
            pos.row += region_top;
        }
        page.extend(region.clone());

        place(&mut page, &mut cursor, self.submit.draw(&ctx));
        page.push_line(Vec::new());

        if self.controller.artifact().is_some() {
            place(&mut page, &mut cursor, self.artifact_view.draw(&ctx));
            page.push_line(Vec::new());
            place(&mut page, &mut cursor, self.copy.draw(&ctx));
            page.push_line(Vec::new());
        }
        page.push_line(vec![Span::styled(HELP, ctx.class_style("hint"))]);

        if let Some(modal) = &self.notice {
            page = overlay(page, modal.draw(&ctx).lines, 2);
            cursor = None;
        }

        self.controller.mount_region(region);
        (page, cursor)
    }

    pub fn render(&mut self, terminal: &mut Terminal) -> io::Result<()> {
        self.size = terminal.size();
        let (frame, cursor) = self.compose();
        terminal.draw(&frame, cursor)
    }
}

fn build_field(field: Field) -> InputField {
    match field {
        Field::Name => InputField::new(field.path(), "Name", InputType::Text, InputMode::Text),
        Field::Email => InputField::new(field.path(), "Email", InputType::Email, InputMode::Email),
        Field::Password => {
            InputField::new(field.path(), "Password", InputType::Password, InputMode::Text)
        }
        Field::ConfirmPassword => InputField::new(
            field.path(),
            "Confirm password",
            InputType::Password,
            InputMode::Text,
        ),
    }
}

/// Appends `out` to `frame`, translating a widget cursor into frame rows.
fn place(frame: &mut Frame, cursor: &mut Option<CursorPos>, out: DrawOutput) {
    let top = frame.height() as u16;
    if let Some(pos) = out.cursor {
        *cursor = Some(CursorPos {
            col: pos.col,
            row: top + pos.row,
        });
    }
    for line in out.lines {
        frame.push_line(line);
    }
}

fn overlay(page: Frame, modal: Vec<SpanLine>, at: usize) -> Frame {
    let mut lines = page.lines().to_vec();
    for (offset, line) in modal.into_iter().enumerate() {
        let row = at + offset;
        if row < lines.len() {
            lines[row] = line;
        } else {
            lines.push(line);
        }
    }
    Frame::from_lines(lines)
}

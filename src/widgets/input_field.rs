use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::widgets::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};
use unicode_width::UnicodeWidthChar;

const MAX_FIELD_WIDTH: usize = 48;
const GUTTER: usize = 2;
const SHOW_LABEL: &str = "[show]";
const HIDE_LABEL: &str = "[hide]";
const ERROR_ICON: &str = "!";

/// Declared kind of input, independent of how it is currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Number,
    Email,
    Url,
    Tel,
    Password,
}

/// Keyboard hint; on a terminal it restricts which characters are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    Tel,
    Url,
    None,
    Email,
    Numeric,
}

impl InputMode {
    pub fn accepts(self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self {
            Self::Numeric => ch.is_ascii_digit(),
            Self::Tel => ch.is_ascii_digit() || matches!(ch, '+' | '-' | '(' | ')' | ' ' | '#' | '*'),
            Self::Email | Self::Url => !ch.is_whitespace(),
            Self::Text | Self::None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordVisibility {
    #[default]
    Hidden,
    Visible,
}

impl PasswordVisibility {
    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Visible,
            Self::Visible => Self::Hidden,
        }
    }
}

/// What the line under an input shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Hint(String),
    Error(String),
    /// Nothing to show; the line is still drawn to keep layout stable.
    Empty,
}

pub fn feedback_line(hint: Option<&str>, touched: bool, error: Option<&str>) -> Feedback {
    match (touched, error) {
        (true, Some(error)) => Feedback::Error(error.to_string()),
        _ => match hint {
            Some(hint) => Feedback::Hint(hint.to_string()),
            None => Feedback::Empty,
        },
    }
}

/// Single bound text input with a floating label and inline feedback.
pub struct InputField {
    id: String,
    name: String,
    placeholder: String,
    input_type: InputType,
    input_mode: InputMode,
    hint: Option<String>,
    class_name: Option<String>,
    value: String,
    cursor: usize,
    visibility: PasswordVisibility,
}

impl InputField {
    pub fn new(
        name: impl Into<String>,
        placeholder: impl Into<String>,
        input_type: InputType,
        input_mode: InputMode,
    ) -> Self {
        let name = name.into();
        Self {
            id: format!("field:{name}"),
            name,
            placeholder: placeholder.into(),
            input_type,
            input_mode,
            hint: None,
            class_name: None,
            value: String::new(),
            cursor: 0,
            visibility: PasswordVisibility::Hidden,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the edit buffer from the bound value, keeping the cursor at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = text_edit::char_count(&self.value);
    }

    pub fn visibility(&self) -> PasswordVisibility {
        self.visibility
    }

    /// Flips password visibility; a no-op for non-password inputs.
    pub fn toggle_visibility(&mut self) -> bool {
        if self.input_type != InputType::Password {
            return false;
        }
        self.visibility = self.visibility.toggled();
        true
    }

    /// Type the input is currently rendered as.
    pub fn effective_type(&self) -> InputType {
        match (self.input_type, self.visibility) {
            (InputType::Password, PasswordVisibility::Visible) => InputType::Text,
            (input_type, _) => input_type,
        }
    }

    pub fn feedback(&self, ctx: &RenderContext<'_>) -> Feedback {
        let touched = ctx.bindings.is_touched(&self.name);
        let error = ctx.bindings.error_of(&self.name);
        feedback_line(self.hint.as_deref(), touched, error)
    }

    fn display_value(&self) -> String {
        match self.effective_type() {
            InputType::Password => "*".repeat(text_edit::char_count(&self.value)),
            _ => self.value.clone(),
        }
    }

    fn field_width(ctx: &RenderContext<'_>) -> usize {
        (ctx.width as usize)
            .saturating_sub(GUTTER)
            .clamp(12, MAX_FIELD_WIDTH)
    }

    fn edited(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::ValueChanged {
            field: self.name.clone(),
            value: self.value.clone(),
        })
    }

    fn value_row(&self, ctx: &RenderContext<'_>, focused: bool) -> (SpanLine, Option<u16>) {
        let width = Self::field_width(ctx);
        let toggle = (self.input_type == InputType::Password).then(|| match self.visibility {
            PasswordVisibility::Hidden => SHOW_LABEL,
            PasswordVisibility::Visible => HIDE_LABEL,
        });
        let text_room = width.saturating_sub(toggle.map_or(0, |t| t.len() + 1)).max(1);

        let marker = if focused { "> " } else { "  " };
        let mut row = vec![Span::styled(marker, ctx.class_style("label"))];

        let (shown, cursor_col) = if self.value.is_empty() && !focused {
            let placeholder = clip(&self.placeholder, 0, text_room);
            (
                Span::styled(placeholder, ctx.class_style("placeholder")),
                None,
            )
        } else {
            let classes = ctx
                .classes()
                .add("input")
                .add_if(focused, "input-focused")
                .add_if(self.input_type == InputType::Password, "input-password")
                .extend_raw(self.class_name.as_deref());
            let display = self.display_value();
            let cursor = text_edit::clamp_cursor(self.cursor, &self.value);
            let offset = scroll_offset(&display, cursor, text_room);
            let visible = clip(&display, offset, text_room);
            let col = display
                .chars()
                .skip(offset)
                .take(cursor - offset)
                .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
                .sum::<usize>();
            (Span::styled(visible, ctx.style(&classes)), Some((GUTTER + col) as u16))
        };
        let used = shown.width();
        row.push(shown);

        if let Some(toggle) = toggle {
            let pad = width.saturating_sub(used + toggle.len());
            row.push(Span::new(" ".repeat(pad)));
            row.push(Span::styled(toggle, ctx.class_style("toggle")));
        }
        (row, cursor_col)
    }
}

/// First visible char so the text before the cursor, plus the cursor cell,
/// fits in `room` terminal cells.
fn scroll_offset(text: &str, cursor: usize, room: usize) -> usize {
    let widths: Vec<usize> = text
        .chars()
        .take(cursor)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .collect();
    let mut used: usize = widths.iter().sum();
    let mut offset = 0;
    while offset < widths.len() && used + 1 > room {
        used -= widths[offset];
        offset += 1;
    }
    offset
}

fn clip(text: &str, skip: usize, room: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars().skip(skip) {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > room {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

impl Drawable for InputField {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let focused = ctx.is_focused(&self.id);
        let width = Self::field_width(ctx);
        let floating = focused || !self.value.is_empty();

        let label_row = if floating {
            vec![
                Span::new(" ".repeat(GUTTER)),
                Span::styled(self.placeholder.clone(), ctx.class_style("label-floating")),
            ]
        } else {
            Vec::new()
        };

        let (value_row, cursor_col) = self.value_row(ctx, focused);

        let underline_class = if focused {
            "underline-focused"
        } else {
            "underline"
        };
        let underline = vec![
            Span::new(" ".repeat(GUTTER)),
            Span::styled("-".repeat(width), ctx.class_style(underline_class)),
        ];

        let feedback = match self.feedback(ctx) {
            Feedback::Hint(hint) => vec![
                Span::new(" ".repeat(GUTTER)),
                Span::styled(hint, ctx.class_style("hint")),
            ],
            Feedback::Error(error) => vec![
                Span::new(" ".repeat(GUTTER)),
                Span::styled(ERROR_ICON, ctx.class_style("error-icon")),
                Span::new(" "),
                Span::styled(error, ctx.class_style("error")),
            ],
            Feedback::Empty => Vec::new(),
        };

        DrawOutput {
            lines: vec![label_row, value_row, underline, feedback],
            cursor: cursor_col
                .filter(|_| focused)
                .map(|col| CursorPos { col, row: 1 }),
        }
    }
}

impl Interactive for InputField {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('t') => {
                    if self.toggle_visibility() {
                        InteractionResult::handled()
                    } else {
                        InteractionResult::ignored()
                    }
                }
                KeyCode::Char('w') => {
                    if text_edit::delete_word_left(&mut self.value, &mut self.cursor) {
                        return self.edited();
                    }
                    InteractionResult::ignored()
                }
                _ => InteractionResult::ignored(),
            };
        }

        match key.code {
            KeyCode::Char(ch) => {
                if !self.input_mode.accepts(ch) {
                    return InteractionResult::ignored();
                }
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                self.edited()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Feedback, InputField, InputMode, InputType, PasswordVisibility, feedback_line,
    };
    use crate::core::form_state::FormState;
    use crate::core::form_values::{Field, FormVariant};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::span::SpanLine;
    use crate::ui::style::Color;
    use crate::ui::theme::Theme;
    use crate::widgets::traits::{Drawable, Interactive, RenderContext, WidgetAction};
    use unicode_width::UnicodeWidthStr;

    fn text_of(line: &SpanLine) -> String {
        line.iter().map(|span| span.text.as_str()).collect()
    }

    fn ctx<'a>(state: &'a FormState, theme: &'a Theme, focused: Option<&'a str>) -> RenderContext<'a> {
        RenderContext {
            focused_id: focused,
            bindings: state,
            theme,
            class_prefix: None,
            width: 40,
        }
    }

    #[test]
    fn feedback_prefers_error_only_when_touched() {
        assert_eq!(
            feedback_line(Some("We never share it"), false, Some("Required")),
            Feedback::Hint("We never share it".into())
        );
        assert_eq!(
            feedback_line(Some("We never share it"), true, Some("Required")),
            Feedback::Error("Required".into())
        );
        assert_eq!(feedback_line(None, true, None), Feedback::Empty);
        assert_eq!(feedback_line(None, false, Some("Required")), Feedback::Empty);
        assert_eq!(
            feedback_line(None, true, Some("Required")),
            Feedback::Error("Required".into())
        );
    }

    #[test]
    fn toggle_flips_rendered_type_but_not_value() {
        let mut field = InputField::new("password", "Password", InputType::Password, InputMode::Text);
        field.set_value("hunter2");
        assert_eq!(field.effective_type(), InputType::Password);

        field.on_key(KeyEvent::ctrl('t'));
        assert_eq!(field.visibility(), PasswordVisibility::Visible);
        assert_eq!(field.effective_type(), InputType::Text);
        assert_eq!(field.value(), "hunter2");

        assert!(field.toggle_visibility());
        assert_eq!(field.effective_type(), InputType::Password);
    }

    #[test]
    fn toggle_is_unavailable_for_plain_inputs() {
        let mut field = InputField::new("name", "Name", InputType::Text, InputMode::Text);
        let result = field.on_key(KeyEvent::ctrl('t'));
        assert!(!result.handled);
        assert_eq!(field.visibility(), PasswordVisibility::Hidden);
    }

    #[test]
    fn typing_emits_value_changes_and_respects_input_mode() {
        let mut field = InputField::new("phone", "Phone", InputType::Tel, InputMode::Tel);
        let result = field.on_key(KeyEvent::plain(KeyCode::Char('5')));
        assert_eq!(
            result.actions,
            vec![WidgetAction::ValueChanged {
                field: "phone".into(),
                value: "5".into()
            }]
        );
        assert!(!field.on_key(KeyEvent::plain(KeyCode::Char('x'))).handled);
        assert_eq!(field.value(), "5");
    }

    #[test]
    fn password_is_masked_until_revealed() {
        let state = FormState::new(FormVariant::WithPassword);
        let theme = Theme::default_theme();
        let mut field = InputField::new("password", "Password", InputType::Password, InputMode::Text);
        field.set_value("abc");

        let out = field.draw(&ctx(&state, &theme, None));
        let row = text_of(&out.lines[1]);
        assert!(row.contains("***"));
        assert!(row.ends_with("[show]"));

        field.toggle_visibility();
        let row = text_of(&field.draw(&ctx(&state, &theme, None)).lines[1]);
        assert!(row.contains("abc"));
        assert!(row.ends_with("[hide]"));
    }

    #[test]
    fn error_line_appears_after_touch_and_hides_hint() {
        let mut state = FormState::new(FormVariant::Basic);
        let theme = Theme::default_theme();
        let field = InputField::new("email", "Email", InputType::Email, InputMode::Email)
            .with_hint("Work address preferred");

        let before = field.draw(&ctx(&state, &theme, None));
        assert_eq!(text_of(&before.lines[3]).trim(), "Work address preferred");

        state.set_touched("email");
        let after = field.draw(&ctx(&state, &theme, None));
        assert_eq!(text_of(&after.lines[3]).trim(), "! Required");

        state.set_value(Field::Email, "a@b.com");
        let fixed = field.draw(&ctx(&state, &theme, None));
        assert_eq!(text_of(&fixed.lines[3]).trim(), "Work address preferred");
    }

    #[test]
    fn layout_reserves_feedback_line_and_floats_label() {
        let state = FormState::new(FormVariant::Basic);
        let theme = Theme::default_theme();
        let mut field = InputField::new("name", "Name", InputType::Text, InputMode::Text);

        let resting = field.draw(&ctx(&state, &theme, None));
        assert_eq!(resting.lines.len(), 4);
        assert!(resting.lines[0].is_empty());
        assert_eq!(text_of(&resting.lines[1]).trim(), "Name");
        assert!(resting.lines[3].is_empty());

        field.set_value("Amir");
        let id = field.id().to_string();
        let focused = field.draw(&ctx(&state, &theme, Some(id.as_str())));
        assert_eq!(text_of(&focused.lines[0]).trim(), "Name");
        assert_eq!(text_of(&focused.lines[1]), "> Amir");
        assert_eq!(focused.cursor.map(|c| (c.col, c.row)), Some((6, 1)));
    }

    #[test]
    fn caller_class_name_is_applied_to_the_value() {
        let state = FormState::new(FormVariant::Basic);
        let theme = Theme::default_theme();
        let mut field = InputField::new("name", "Name", InputType::Text, InputMode::Text)
            .with_class_name("error");
        field.set_value("Amir");

        let out = field.draw(&ctx(&state, &theme, None));
        assert_eq!(out.lines[1][1].text, "Amir");
        assert_eq!(out.lines[1][1].style.color, Some(Color::Red));
    }

    #[test]
    fn wide_text_scrolls_by_cells_and_keeps_cursor_inside() {
        let state = FormState::new(FormVariant::Basic);
        let theme = Theme::default_theme();
        let mut field = InputField::new("name", "Name", InputType::Text, InputMode::Text);
        field.set_value(format!("{}末", "界".repeat(24)));

        let id = field.id().to_string();
        let out = field.draw(&ctx(&state, &theme, Some(id.as_str())));
        let row = text_of(&out.lines[1]);
        assert!(row.ends_with('末'));
        assert_eq!(out.cursor.map(|c| c.col), Some(38));
        assert!(UnicodeWidthStr::width(row.as_str()) <= 40);
    }
}

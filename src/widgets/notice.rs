use crate::core::controller::{Notice, NoticeKind};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use unicode_width::UnicodeWidthStr;

const DISMISS: &str = "[ OK ]";

/// Blocking acknowledgment: swallows all keys until dismissed.
pub struct NoticeModal {
    notice: Notice,
    dismissed: bool,
}

impl NoticeModal {
    pub fn new(notice: Notice) -> Self {
        Self {
            notice,
            dismissed: false,
        }
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }
}

impl Drawable for NoticeModal {
    fn id(&self) -> &str {
        "notice"
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let class = match self.notice.kind {
            NoticeKind::Success => "notice",
            NoticeKind::Failure => "notice-error",
        };
        let style = ctx.class_style(class);
        let inner = UnicodeWidthStr::width(self.notice.message.as_str()).max(DISMISS.len()) + 2;
        let pad_line = |text: &str| {
            let width = UnicodeWidthStr::width(text);
            let left = (inner - width) / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(inner - width - left))
        };

        let lines = [
            pad_line(""),
            pad_line(&self.notice.message),
            pad_line(""),
            pad_line(DISMISS),
            pad_line(""),
        ]
        .into_iter()
        .map(|text| vec![Span::new("  "), Span::styled(text, style)])
        .collect();

        DrawOutput {
            lines,
            cursor: None,
        }
    }
}

impl Interactive for NoticeModal {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.dismissed = true;
        }
        InteractionResult::handled()
    }
}

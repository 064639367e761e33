use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use std::cell::Cell;

const VISIBLE_ROWS: usize = 4;
const MAX_WIDTH: usize = 64;

/// Read-only, scrollable view of the captured artifact text.
pub struct ArtifactView {
    id: String,
    heading: String,
    text: String,
    scroll: usize,
    drawn_width: Cell<usize>,
}

impl ArtifactView {
    pub fn new(id: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            text: String::new(),
            scroll: 0,
            drawn_width: Cell::new(MAX_WIDTH),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.scroll = 0;
    }

    fn chunks(&self, width: usize) -> Vec<String> {
        let chars: Vec<char> = self.text.chars().collect();
        chars
            .chunks(width.max(1))
            .map(|chunk| chunk.iter().collect())
            .collect()
    }

    fn row_width(ctx: &RenderContext<'_>) -> usize {
        (ctx.width as usize).saturating_sub(4).clamp(8, MAX_WIDTH)
    }
}

impl Drawable for ArtifactView {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let focused = ctx.is_focused(&self.id);
        let width = Self::row_width(ctx);
        self.drawn_width.set(width);
        let rows = self.chunks(width);
        let border = ctx.class_style(if focused { "underline-focused" } else { "underline" });
        let body = ctx.class_style("textarea");

        let mut lines = vec![
            vec![
                Span::new("  "),
                Span::styled(self.heading.clone(), ctx.class_style("output-heading")),
            ],
            vec![Span::new("  "), Span::styled(format!("+{}+", "-".repeat(width)), border)],
        ];
        for row in rows.iter().skip(self.scroll).take(VISIBLE_ROWS) {
            let pad = width.saturating_sub(row.chars().count());
            lines.push(vec![
                Span::new("  "),
                Span::styled("|", border),
                Span::styled(format!("{row}{}", " ".repeat(pad)), body),
                Span::styled("|", border),
            ]);
        }
        let footer = format!(
            " {}-{} of {} rows, {} chars ",
            (self.scroll + 1).min(rows.len()),
            (self.scroll + VISIBLE_ROWS).min(rows.len()),
            rows.len(),
            self.text.chars().count()
        );
        let fill = width.saturating_sub(footer.len());
        lines.push(vec![
            Span::new("  "),
            Span::styled(format!("+{footer}{}+", "-".repeat(fill)), border),
        ]);

        DrawOutput {
            lines,
            cursor: None,
        }
    }
}

impl Interactive for ArtifactView {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let total = self.chunks(self.drawn_width.get()).len();
        let max_scroll = total.saturating_sub(VISIBLE_ROWS);
        match key.code {
            KeyCode::Down if self.scroll < max_scroll => {
                self.scroll += 1;
                InteractionResult::handled()
            }
            KeyCode::Up if self.scroll > 0 => {
                self.scroll -= 1;
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ArtifactView;
    use crate::core::form_state::FormState;
    use crate::core::form_values::FormVariant;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::theme::Theme;
    use crate::widgets::traits::{Drawable, Interactive, RenderContext};

    #[test]
    fn long_artifact_scrolls_within_bounds() {
        let state = FormState::new(FormVariant::Basic);
        let theme = Theme::default_theme();
        let ctx = RenderContext {
            focused_id: None,
            bindings: &state,
            theme: &theme,
            class_prefix: None,
            width: 24,
        };
        let mut view = ArtifactView::new("artifact", "Base64 Screenshot:");
        view.set_text("x".repeat(20 * 6));

        let out = view.draw(&ctx);
        // heading, top border, four rows, footer
        assert_eq!(out.lines.len(), 7);

        assert!(!view.on_key(KeyEvent::plain(KeyCode::Up)).handled);
        assert!(view.on_key(KeyEvent::plain(KeyCode::Down)).handled);
        assert!(view.on_key(KeyEvent::plain(KeyCode::Down)).handled);
        assert!(!view.on_key(KeyEvent::plain(KeyCode::Down)).handled);
    }
}

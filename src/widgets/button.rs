use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};

pub struct Button {
    id: String,
    text: String,
    disabled: bool,
}

impl Button {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            disabled: false,
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Drawable for Button {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let focused = ctx.is_focused(&self.id);
        let classes = ctx
            .classes()
            .add("button")
            .add_if(focused && !self.disabled, "button-focused")
            .add_if(self.disabled, "button-disabled");
        let marker = if focused { "> " } else { "  " };

        DrawOutput {
            lines: vec![vec![
                Span::new(marker),
                Span::styled(format!(" {} ", self.text), ctx.style(&classes)),
            ]],
            cursor: None,
        }
    }
}

impl Interactive for Button {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') if !self.disabled => {
                InteractionResult::with_action(WidgetAction::Activated {
                    id: self.id.clone(),
                })
            }
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Button;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::{Interactive, WidgetAction};

    #[test]
    fn disabled_button_ignores_activation() {
        let mut button = Button::new("submit", "Submit and Copy Screenshot");
        button.set_disabled(true);
        assert!(button.is_disabled());
        assert!(!button.on_key(KeyEvent::plain(KeyCode::Enter)).handled);

        button.set_disabled(false);
        let result = button.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert_eq!(
            result.actions,
            vec![WidgetAction::Activated {
                id: "submit".into()
            }]
        );
    }
}

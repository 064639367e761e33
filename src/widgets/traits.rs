use crate::core::form_state::FieldBindings;
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::class_names::ClassList;
use crate::ui::span::SpanLine;
use crate::ui::style::Style;
use crate::ui::theme::Theme;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

pub struct RenderContext<'a> {
    pub focused_id: Option<&'a str>,
    pub bindings: &'a dyn FieldBindings,
    pub theme: &'a Theme,
    pub class_prefix: Option<&'a str>,
    pub width: u16,
}

impl RenderContext<'_> {
    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id == Some(id)
    }

    pub fn classes(&self) -> ClassList {
        ClassList::new(self.class_prefix)
    }

    pub fn style(&self, classes: &ClassList) -> Style {
        self.theme.resolve(classes)
    }

    /// Style for a single class, honouring the prefix scheme.
    pub fn class_style(&self, class: &str) -> Style {
        self.theme.resolve(&self.classes().add(class))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Cursor position relative to the first line of this output.
    pub cursor: Option<CursorPos>,
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    ValueChanged { field: String, value: String },
    Activated { id: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionResult {
    pub handled: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            actions: vec![action],
        }
    }
}

// ---------------------------------------------------------------------------
// Drawable / Interactive
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn id(&self) -> &str;
    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput;
}

pub trait Interactive: Drawable {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;
}

use crate::ui::class_names::ClassList;
use crate::ui::style::{Color, Style};
use indexmap::IndexMap;

/// Maps style class names to terminal styles.
#[derive(Debug, Clone)]
pub struct Theme {
    classes: IndexMap<&'static str, Style>,
}

impl Theme {
    pub fn default_theme() -> Self {
        let classes = IndexMap::from([
            ("heading", Style::new().color(Color::White).bold()),
            ("label", Style::new().color(Color::White)),
            ("label-floating", Style::new().color(Color::Grey).dim()),
            ("input", Style::new().color(Color::White)),
            ("input-focused", Style::new().bold()),
            ("input-password", Style::new().color(Color::Cyan)),
            ("placeholder", Style::new().color(Color::DarkGrey)),
            ("toggle", Style::new().color(Color::Grey)),
            ("underline", Style::new().color(Color::DarkGrey)),
            ("underline-focused", Style::new().color(Color::White)),
            ("hint", Style::new().color(Color::DarkGrey)),
            ("error", Style::new().color(Color::Red)),
            ("error-icon", Style::new().color(Color::Red).bold()),
            ("button", Style::new().color(Color::White).background(Color::Blue)),
            ("button-focused", Style::new().color(Color::Black).background(Color::Cyan).bold()),
            ("button-disabled", Style::new().color(Color::DarkGrey).background(Color::Reset)),
            ("output-heading", Style::new().color(Color::White).bold()),
            ("textarea", Style::new().color(Color::Grey)),
            ("notice", Style::new().color(Color::Black).background(Color::White)),
            ("notice-error", Style::new().color(Color::White).background(Color::Red)),
        ]);
        Self { classes }
    }

    /// Later classes override earlier ones.
    pub fn resolve(&self, list: &ClassList) -> Style {
        list.unprefixed()
            .filter_map(|class| self.classes.get(class))
            .fold(Style::new(), |acc, style| acc.merge(*style))
    }
}

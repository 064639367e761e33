use crate::ui::span::{SpanLine, line_width};

/// A block of styled lines, as drawn to the terminal or handed to the rasterizer.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Frame {
    lines: Vec<SpanLine>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<SpanLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[SpanLine] {
        &self.lines
    }

    pub fn push_line(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, other: Frame) {
        self.lines.extend(other.lines);
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Widest line in terminal cells.
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line_width(line))
            .max()
            .unwrap_or(0)
    }

    pub fn is_blank(&self) -> bool {
        self.lines
            .iter()
            .all(|line| line.iter().all(|span| span.text.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use crate::ui::span::Span;

    #[test]
    fn width_is_widest_line() {
        let frame = Frame::from_lines(vec![
            vec![Span::new("ab"), Span::new("cd")],
            vec![Span::new("x")],
            Vec::new(),
        ]);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 3);
        assert!(!frame.is_blank());
    }

    #[test]
    fn whitespace_only_frame_is_blank() {
        let frame = Frame::from_lines(vec![vec![Span::new("   ")], Vec::new()]);
        assert!(frame.is_blank());
        assert!(Frame::new().is_blank());
    }
}

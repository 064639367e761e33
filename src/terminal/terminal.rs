use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
use crate::ui::frame::Frame;
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::event::{Event, KeyEventKind, poll, read};
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;

pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
        })
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            terminal::DisableLineWrap,
            cursor::Hide
        )
    }

    pub fn leave(&mut self) -> io::Result<()> {
        execute!(
            self.stdout,
            cursor::Show,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        poll(timeout)
    }

    pub fn read_event(&mut self) -> io::Result<Option<TerminalEvent>> {
        match read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(Some(TerminalEvent::Key(map_key_event(key))))
            }
            Event::Resize(width, height) => {
                self.size = TerminalSize { width, height };
                Ok(Some(TerminalEvent::Resize(self.size)))
            }
            _ => Ok(None),
        }
    }

    /// Redraws the whole screen from `frame`, clipping to the terminal height.
    pub fn draw(&mut self, frame: &Frame, cursor_pos: Option<CursorPos>) -> io::Result<()> {
        queue!(
            self.stdout,
            terminal::BeginSynchronizedUpdate,
            cursor::Hide,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        for (row, line) in frame.lines().iter().enumerate() {
            if row >= self.size.height as usize {
                break;
            }
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            self.queue_line(line)?;
        }
        if let Some(pos) = cursor_pos {
            queue!(self.stdout, cursor::MoveTo(pos.col, pos.row), cursor::Show)?;
        }
        queue!(self.stdout, terminal::EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn queue_line(&mut self, line: &SpanLine) -> io::Result<()> {
        for span in line {
            let style = span.style;
            let has_style = style.color.is_some() || style.background.is_some() || style.bold || style.dim;
            if let Some(fg) = style.color {
                queue!(self.stdout, SetForegroundColor(map_color(fg)))?;
            }
            if let Some(bg) = style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(bg)))?;
            }
            if style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(self.stdout, Print(span.text.as_str()))?;
            if has_style {
                queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        Ok(())
    }
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::Reset => crossterm::style::Color::Reset,
        Color::Black => crossterm::style::Color::Black,
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Grey => crossterm::style::Color::Grey,
        Color::Red => crossterm::style::Color::Red,
        Color::Green => crossterm::style::Color::Green,
        Color::Yellow => crossterm::style::Color::Yellow,
        Color::Blue => crossterm::style::Color::Blue,
        Color::Magenta => crossterm::style::Color::Magenta,
        Color::Cyan => crossterm::style::Color::Cyan,
        Color::White => crossterm::style::Color::White,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::BackTab => KeyCode::BackTab,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        _ => KeyCode::Other,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::SHIFT) {
        mapped |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped |= KeyModifiers::ALT;
    }
    mapped
}

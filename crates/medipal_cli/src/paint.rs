//! ANSI color helpers for terminal output.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Magenta,
    Cyan,
    Gray,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Self::Red => "\x1b[31m",
            Self::Green => "\x1b[32m",
            Self::Yellow => "\x1b[33m",
            Self::Magenta => "\x1b[35m",
            Self::Cyan => "\x1b[36m",
            Self::Gray => "\x1b[90m",
        }
    }
}

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let weight = if bold { BOLD } else { "" };
        format!("{weight}{}{text}{RESET}", color.code())
    }

    pub fn ok(&self, text: &str) {
        println!("{}", self.paint(text, Color::Green, false));
    }

    pub fn warn(&self, text: &str) {
        println!("{}", self.paint(text, Color::Yellow, false));
    }

    pub fn err(&self, text: &str) {
        eprintln!("{}", self.paint(text, Color::Red, true));
    }

    pub fn heading(&self, text: &str) {
        println!("{}", self.paint(text, Color::Cyan, true));
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Painter};

    #[test]
    fn disabled_painter_returns_plain_text() {
        assert_eq!(Painter::new(false).paint("ok", Color::Green, true), "ok");
    }

    #[test]
    fn enabled_painter_wraps_with_reset() {
        let painted = Painter::new(true).paint("ok", Color::Red, false);
        assert!(painted.starts_with("\x1b[31m"));
        assert!(painted.ends_with("\x1b[0m"));
    }
}

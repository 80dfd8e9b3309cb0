use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Style};
use colored::{Color, Colorize};
use once_cell::sync::Lazy;

/// Role of a piece of terminal text; decides its color and leading icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
    Muted,
    Heading,
    Literal,
}

impl Tone {
    pub const fn color(self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Error => Color::Red,
            Tone::Warning => Color::Yellow,
            Tone::Info => Color::Blue,
            Tone::Muted => Color::BrightBlack,
            Tone::Heading => Color::BrightBlue,
            Tone::Literal => Color::Magenta,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Tone::Success => "✓",
            Tone::Error => "✗",
            Tone::Warning => "⚠",
            Tone::Info => "ℹ",
            Tone::Muted | Tone::Literal => "→",
            Tone::Heading => "•",
        }
    }

    const fn ansi(self) -> AnsiColor {
        match self {
            Tone::Success => AnsiColor::Green,
            Tone::Error => AnsiColor::Red,
            Tone::Warning => AnsiColor::Yellow,
            Tone::Info => AnsiColor::Blue,
            Tone::Muted => AnsiColor::BrightBlack,
            Tone::Heading => AnsiColor::BrightBlue,
            Tone::Literal => AnsiColor::Magenta,
        }
    }

    fn style(self) -> Style {
        Style::new().fg_color(Some(self.ansi().into()))
    }
}

/// Color `text` in the tone's color, or leave it plain.
pub fn paint(text: &str, tone: Tone, bold: bool, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    let colored = text.color(tone.color());
    if bold { colored.bold().to_string() } else { colored.to_string() }
}

/// clap help colors, matching the message palette.
pub static HELP_STYLES: Lazy<Styles> = Lazy::new(|| {
    Styles::styled()
        .usage(Tone::Heading.style().bold())
        .header(Tone::Heading.style().bold())
        .literal(Tone::Literal.style())
        .placeholder(Tone::Muted.style())
        .valid(Tone::Success.style())
        .invalid(Tone::Warning.style())
        .error(Tone::Error.style().bold())
});

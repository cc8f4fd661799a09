use crate::graph::Level;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const FOCUSED_BORDER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const CURSOR_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const KEY_HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const HELP_KEY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Glyph marking the cell under the keyboard cursor
pub(crate) const CURSOR_GLYPH: &str = "•";

/// What a cell fades in from
const BACKGROUND: (u8, u8, u8) = (0x00, 0x00, 0x00);

/// Fill for days with no activity
const EMPTY_CELL: (u8, u8, u8) = (0x30, 0x30, 0x30);

/// The fill for a cell of the given level, shaded from `base` and faded
/// toward the background by `opacity`.  Blank cells have no fill.
pub(crate) fn level_color(level: Level, base: Color, opacity: f64) -> Option<Color> {
    let full = match level {
        Level::Blank => return None,
        Level::None => EMPTY_CELL,
        _ => blend(to_rgb(base), BACKGROUND, level.tint_alpha().unwrap_or(1.0)),
    };
    let (r, g, b) = blend(full, BACKGROUND, opacity);
    Some(Color::Rgb(r, g, b))
}

fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), alpha: f64) -> (u8, u8, u8) {
    let alpha = alpha.clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mix = |f: u8, b: u8| {
        (f64::from(f) * alpha + f64::from(b) * (1.0 - alpha))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

// Approximations of the xterm defaults for the named colours
fn to_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0x00, 0x00, 0x00),
        Color::Red => (0xcd, 0x00, 0x00),
        Color::Green => (0x00, 0xcd, 0x00),
        Color::Yellow => (0xcd, 0xcd, 0x00),
        Color::Blue => (0x00, 0x00, 0xee),
        Color::Magenta => (0xcd, 0x00, 0xcd),
        Color::Cyan => (0x00, 0xcd, 0xcd),
        Color::Gray => (0xe5, 0xe5, 0xe5),
        Color::DarkGray => (0x7f, 0x7f, 0x7f),
        Color::LightRed => (0xff, 0x00, 0x00),
        Color::LightGreen => (0x00, 0xff, 0x00),
        Color::LightYellow => (0xff, 0xff, 0x00),
        Color::LightBlue => (0x5c, 0x5c, 0xff),
        Color::LightMagenta => (0xff, 0x00, 0xff),
        Color::LightCyan => (0x00, 0xff, 0xff),
        Color::White | Color::Reset | Color::Indexed(_) => (0xff, 0xff, 0xff),
    }
}

pub(crate) mod goto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}

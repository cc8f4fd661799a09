use ratatui::style::Color;
use thiserror::Error;

/// Visual configuration of a contribution graph.  None of these settings have
/// any bearing on which record ends up in which cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GraphStyle {
    /// Blank lines between the border and the weekday header, and between the
    /// last row and the border
    pub(crate) vertical_inset: u16,
    /// Blank columns between the border and the grid on either side
    pub(crate) horizontal_inset: u16,
    /// Columns between adjacent cells
    pub(crate) item_spacing: u16,
    /// Lines between adjacent rows of cells
    pub(crate) line_spacing: u16,
    /// Lines between the weekday header and the first row
    pub(crate) header_spacing: u16,
    /// Nonzero gives the border rounded corners
    pub(crate) corner_radius: u16,
    /// 0 = no border, 1 = plain, 2 or more = thick
    pub(crate) border_width: u16,
    pub(crate) border_color: Color,
    pub(crate) label_color: Color,
    /// Tint that cells are shaded with according to their level
    pub(crate) base_color: Color,
    pub(crate) enable_reload_animation: bool,
}

impl Default for GraphStyle {
    fn default() -> Self {
        GraphStyle {
            vertical_inset: 0,
            horizontal_inset: 1,
            item_spacing: 1,
            line_spacing: 1,
            header_spacing: 1,
            corner_radius: 1,
            border_width: 1,
            border_color: Color::Gray,
            label_color: Color::Gray,
            base_color: Color::Rgb(0x2f, 0x81, 0xf7),
            enable_reload_animation: true,
        }
    }
}

impl GraphStyle {
    pub(crate) fn base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    pub(crate) fn enable_reload_animation(mut self, flag: bool) -> Self {
        self.enable_reload_animation = flag;
        self
    }

    pub(crate) fn border_width(mut self, width: u16) -> Self {
        self.border_width = width;
        self
    }

    pub(crate) fn corner_radius(mut self, radius: u16) -> Self {
        self.corner_radius = radius;
        self
    }
}

/// Parse a colour given either as `#RRGGBB` or as one of the sixteen standard
/// terminal colour names
pub(crate) fn parse_color(s: &str) -> Result<Color, ParseColorError> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_owned()));
        }
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| ParseColorError(s.to_owned()))
        };
        return Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    let color = match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return Err(ParseColorError(s.to_owned())),
    };
    Ok(color)
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid colour {0:?}: expected #RRGGBB or a colour name")]
pub(crate) struct ParseColorError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#2f81F7"), Ok(Color::Rgb(0x2f, 0x81, 0xf7)));
        assert_eq!(parse_color(" #000000 "), Ok(Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_color("green"), Ok(Color::Green));
        assert_eq!(parse_color("Light-Blue"), Ok(Color::LightBlue));
        assert_eq!(parse_color("dark_grey"), Ok(Color::DarkGray));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#12345g").is_err());
        assert!(parse_color("#ééé").is_err());
        assert!(parse_color("chartreuse").is_err());
        assert!(parse_color("").is_err());
    }
}

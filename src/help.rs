use crate::theme::{BASE_STYLE, HELP_KEY_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static KEYS: &[(&str, &str)] = &[
    ("h j k l, ARROWS", "Move between days"),
    ("ENTER, SPACE", "Select the day"),
    ("click", "Select the day under the mouse"),
    ("TAB, BACKTAB", "Focus next/previous graph"),
    ("r", "Refresh with new data"),
    ("g", "Go to another month"),
    ("0, HOME", "Back to the starting month"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEY_COLUMN_WIDTH: usize = 16;

const DISMISS: &str = "Press the Any Key to dismiss.";

/// Overlay listing the key bindings
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn text() -> Text<'static> {
        let mut lines = KEYS
            .iter()
            .map(|&(keys, what)| {
                Line::from_iter([
                    Span::styled(format!("{keys:KEY_COLUMN_WIDTH$}"), HELP_KEY_STYLE),
                    Span::raw(what),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw(DISMISS));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        // One column of padding on either side of the border
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    #[test]
    fn test_render() {
        let area = Rect::new(0, 0, 60, 15);
        let mut buf = Buffer::empty(area);
        Help.render(area, &mut buf);
        let expected = Buffer::with_lines([
            "                                                            ",
            "      ┌────────────────── Commands ──────────────────┐      ",
            "      │h j k l, ARROWS Move between days             │      ",
            "      │ENTER, SPACE    Select the day                │      ",
            "      │click           Select the day under the mouse│      ",
            "      │TAB, BACKTAB    Focus next/previous graph     │      ",
            "      │r               Refresh with new data         │      ",
            "      │g               Go to another month           │      ",
            "      │0, HOME         Back to the starting month    │      ",
            "      │?               Show this help                │      ",
            "      │q, ESC          Quit                          │      ",
            "      │                                              │      ",
            "      │Press the Any Key to dismiss.                 │      ",
            "      └──────────────────────────────────────────────┘      ",
            "                                                            ",
        ]);
        for y in 0..15 {
            for x in 0..60 {
                assert_eq!(
                    buf[(x, y)].symbol(),
                    expected[(x, y)].symbol(),
                    "mismatch at ({x}, {y})"
                );
            }
        }
        assert!(buf[(7, 2)].modifier.contains(Modifier::BOLD));
        assert!(!buf[(23, 2)].modifier.contains(Modifier::BOLD));
    }
}

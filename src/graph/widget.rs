use super::calendar::WeekdayExt;
use super::view::GraphView;
use super::SelectionHandler;
use crate::theme::{
    level_color, CURSOR_GLYPH, CURSOR_STYLE, FOCUSED_BORDER_STYLE, TITLE_STYLE,
};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders},
};
use std::iter::zip;
use std::marker::PhantomData;
use std::time::Instant;

/// Number of columns in the grid, one per weekday
const COLUMNS: u16 = 7;

/// Number of gaps between columns
const GAPS: u16 = COLUMNS - 1;

/// Width of each cell given the width available to the graph:
/// `(available - 2*horizontal_inset - 6*item_spacing) / 7`, or 0 if there is
/// no room
pub(crate) fn cell_width(available: u16, horizontal_inset: u16, item_spacing: u16) -> u16 {
    let chrome = horizontal_inset
        .saturating_mul(2)
        .saturating_add(item_spacing.saturating_mul(GAPS));
    available.saturating_sub(chrome) / COLUMNS
}

/// Terminal cells are roughly twice as tall as they are wide, so a square
/// cell is half as many lines as it is columns
fn cell_height(width: u16) -> u16 {
    (width / 2).max(1)
}

/// Draws a month of activity as a bordered 7-column grid under a row of
/// weekday initials
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct ContributionGraph<H> {
    now: Instant,
    focused: bool,
    _data: PhantomData<H>,
}

impl<H> ContributionGraph<H> {
    pub(crate) fn new(now: Instant) -> ContributionGraph<H> {
        ContributionGraph {
            now,
            focused: false,
            _data: PhantomData,
        }
    }

    pub(crate) fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<H: SelectionHandler> StatefulWidget for ContributionGraph<H> {
    type State = GraphView<H>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let style = *state.style();
        let title = match state.state().cells().month() {
            Some((year, month)) => format!(" {month} {year} "),
            None => String::from(" — "),
        };
        let borders = if style.border_width == 0 {
            Borders::NONE
        } else {
            Borders::ALL
        };
        let border_type = if style.border_width >= 2 {
            BorderType::Thick
        } else if style.corner_radius > 0 {
            BorderType::Rounded
        } else {
            BorderType::Plain
        };
        let border_style = if self.focused {
            FOCUSED_BORDER_STYLE.fg(style.base_color)
        } else {
            Style::new().fg(style.border_color)
        };
        let block = Block::new()
            .borders(borders)
            .border_type(border_type)
            .border_style(border_style)
            .title(Span::styled(title, TITLE_STYLE))
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        block.render(area, buf);

        state.cell_areas.clear();
        let cw = cell_width(inner.width, style.horizontal_inset, style.item_spacing);
        if cw == 0 {
            return;
        }
        let ch = cell_height(cw);
        let grid_width = cw * COLUMNS + style.item_spacing * GAPS;
        let slack = inner
            .width
            .saturating_sub(style.horizontal_inset.saturating_mul(2))
            .saturating_sub(grid_width);
        let left = inner.x + style.horizontal_inset + slack / 2;
        let bottom = inner.bottom().saturating_sub(style.vertical_inset);
        let mut canvas = BufferCanvas::new(inner, buf);

        let header_y = inner.y.saturating_add(style.vertical_inset);
        for (col, wd) in zip(0u16.., state.state().calendar().weekdays()) {
            let x = left + col * (cw + style.item_spacing) + (cw - 1) / 2;
            canvas.print(x, header_y, wd.initial(), Style::new().fg(style.label_color));
        }

        let top = header_y
            .saturating_add(1)
            .saturating_add(style.header_spacing);
        let row_pitch = ch.saturating_add(style.line_spacing);
        let mut areas = Vec::with_capacity(state.state().cells().len());
        for (i, record) in zip(0u16.., state.state().cells()) {
            let col = i % COLUMNS;
            let row = i / COLUMNS;
            let y = top.saturating_add(row.saturating_mul(row_pitch));
            if y.saturating_add(ch) > bottom {
                break;
            }
            let cell = Rect::new(left + col * (cw + style.item_spacing), y, cw, ch);
            areas.push(cell);
            let index = usize::from(i);
            let Some(fill) = level_color(
                record.level,
                style.base_color,
                state.opacity(index, self.now),
            ) else {
                continue;
            };
            canvas.fill(cell, Style::new().bg(fill));
            if self.focused && index == state.cursor() {
                canvas.print(
                    cell.x + (cw - 1) / 2,
                    cell.y + (ch - 1) / 2,
                    CURSOR_GLYPH,
                    CURSOR_STYLE.bg(fill),
                );
            }
        }
        state.cell_areas = areas;
    }
}

/// Drawing confined to one area of a buffer
#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn fill(&mut self, rect: Rect, style: Style) {
        self.buf.set_style(self.area.intersection(rect), style);
    }

    // Absolute coordinates; anything starting outside the canvas is skipped
    fn print(&mut self, x: u16, y: u16, s: &str, style: Style) {
        if y < self.area.y || y >= self.area.bottom() || x < self.area.x || x >= self.area.right()
        {
            return;
        }
        self.buf.set_string(x, y, s, style);
    }
}

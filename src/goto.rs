use crate::theme::{
    goto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::{Date, Month};

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;
const YEAR_DIGITS: usize = 4;
const ENTER_POS: usize = YEAR_DIGITS + 2;

/// Prompt for the month a graph should show
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GoTo;

impl StatefulWidget for GoTo {
    type State = GoToState;

    /*
     * .................
     * .┌── Go To… ───┐.
     * .│             │.
     * .│  -YYYY-MM   │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct GoToState {
    negative: bool,
    year: [Option<u8>; YEAR_DIGITS],
    month: [Option<u8>; 2],
    pos: usize,
}

impl GoToState {
    pub(crate) fn new() -> GoToState {
        GoToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text and not its centering padding should be
            // underlined, hence a styled span rather than a styled line
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        )];
        for (i, (fallback, digits)) in [("Y", self.year.as_slice()), ("M", self.month.as_slice())]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(d.to_string(), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    fn digit_slot(&mut self, pos: usize) -> Option<&mut Option<u8>> {
        if pos < YEAR_DIGITS {
            self.year.get_mut(pos)
        } else {
            self.month.get_mut(pos - YEAR_DIGITS)
        }
    }

    pub(crate) fn handle_input(&mut self, input: GoToInput) -> GoToOutput {
        match (input, self.pos) {
            (GoToInput::Negative, 0) => {
                self.negative = !self.negative;
                GoToOutput::Ok
            }
            (GoToInput::Positive, 0) => {
                self.negative = false;
                GoToOutput::Ok
            }
            (GoToInput::Digit(d), pos) if pos < ENTER_POS => {
                if let Some(slot) = self.digit_slot(pos) {
                    *slot = Some(d);
                }
                self.pos += 1;
                GoToOutput::Ok
            }
            (GoToInput::Backspace, 1..) => {
                self.pos -= 1;
                if let Some(slot) = self.digit_slot(self.pos) {
                    *slot = None;
                }
                GoToOutput::Ok
            }
            (GoToInput::Enter, ENTER_POS) => match self.to_date() {
                Some(date) => GoToOutput::Jump(date),
                None => GoToOutput::Invalid,
            },
            _ => GoToOutput::Invalid,
        }
    }

    /// The first day of the entered month, if all digits are filled in and
    /// form a real month
    fn to_date(self) -> Option<Date> {
        let mut year = 0i32;
        for d in self.year {
            year = year * 10 + i32::from(d?);
        }
        if self.negative {
            year = -year;
        }
        let mut month = 0u8;
        for d in self.month {
            month = month * 10 + d?;
        }
        let month = Month::try_from(month).ok()?;
        Date::from_calendar_date(year, month, 1).ok()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToOutput {
    Ok,
    Invalid,
    Jump(Date),
}

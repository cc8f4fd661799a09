use crate::demo::{month_of_records, random_future_date, random_record};
use crate::goto::{GoTo, GoToInput, GoToOutput, GoToState};
use crate::graph::{
    CalendarConfig, ContributionGraph, GraphState, GraphStyle, GraphView, SelectionLog,
};
use crate::help::Help;
use crate::theme::{BASE_STYLE, KEY_HINT_STYLE, STATUS_STYLE};
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::iter::zip;
use std::time::{Duration, Instant};
use time::{Date, OffsetDateTime};

const GRAPH_COUNT: usize = 3;

/// How long to wait for input between animation frames
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const KEY_HINTS: &str = "r refresh  g go to  ? help  q quit ";

/// Settings for the demo screen gathered from the command line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AppConfig {
    pub(crate) calendar: CalendarConfig,
    /// The month every graph starts out showing
    pub(crate) start: Date,
    pub(crate) base_color: Color,
    pub(crate) animate: bool,
    pub(crate) seed: Option<u64>,
}

/// Three contribution graphs fed with random data, one of which has the
/// keyboard focus
#[derive(Clone, Debug)]
pub(crate) struct App {
    graphs: [GraphView<SelectionLog>; GRAPH_COUNT],
    focus: usize,
    state: AppState,
    calendar: CalendarConfig,
    start: Date,
    rng: StdRng,
    frame_time: Instant,
}

impl App {
    pub(crate) fn new(config: AppConfig) -> App {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let base = GraphStyle::default()
            .base_color(config.base_color)
            .enable_reload_animation(config.animate);
        let styles = [
            base,
            base.corner_radius(0),
            // Moves to a new month on refresh, which reads better without the
            // cells fading in
            base.border_width(2).enable_reload_animation(false),
        ];
        let records = month_of_records(config.start, &config.calendar, &mut rng);
        let now = Instant::now();
        let graphs = styles.map(|style| {
            let state = GraphState::new(
                config.calendar,
                config.start,
                SelectionLog::new(config.calendar),
            );
            let mut view = GraphView::new(state, style);
            view.set_records(records.clone(), config.start, now, &mut rng);
            view
        });
        log::info!(
            "Showing {} graphs for {} {}",
            GRAPH_COUNT,
            config.start.month(),
            config.start.year()
        );
        App {
            graphs,
            focus: 0,
            state: AppState::Graphs,
            calendar: config.calendar,
            start: config.start,
            rng,
            frame_time: now,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.frame_time = Instant::now();
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        for g in &mut self.graphs {
            g.settle(self.frame_time);
        }
        Ok(())
    }

    fn animating(&self) -> bool {
        self.graphs.iter().any(|g| g.is_animating(self.frame_time))
    }

    fn handle_input(&mut self) -> io::Result<()> {
        // Keep drawing frames while a fade is running
        if self.animating() && !poll(FRAME_INTERVAL)? {
            return Ok(());
        }
        match read()? {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                self.click(column, row);
            }
            event => {
                let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
                if let Some(KeyEvent {
                    code, modifiers, ..
                }) = event.as_key_press_event()
                {
                    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                        self.state = AppState::Quitting;
                    } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                        self.beep()?;
                    }
                }
                // else: Redraw on resize, and we might as well redraw on
                // other stuff too
            }
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Graphs => match key {
                KeyCode::Char('h') | KeyCode::Left => self.focused_mut().move_cursor(-1, 0),
                KeyCode::Char('l') | KeyCode::Right => self.focused_mut().move_cursor(1, 0),
                KeyCode::Char('k') | KeyCode::Up => self.focused_mut().move_cursor(0, -1),
                KeyCode::Char('j') | KeyCode::Down => self.focused_mut().move_cursor(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => self.focused_mut().tap_cursor().is_some(),
                KeyCode::Tab => {
                    self.focus = (self.focus + 1) % GRAPH_COUNT;
                    true
                }
                KeyCode::BackTab => {
                    self.focus = (self.focus + GRAPH_COUNT - 1) % GRAPH_COUNT;
                    true
                }
                KeyCode::Char('r') => {
                    self.refresh(OffsetDateTime::now_utc());
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.reset();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::GoingTo(GoToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Graphs;
                true
            }
            AppState::GoingTo(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Graphs;
                    return true;
                }
                let output = match key {
                    KeyCode::Char('-') => state.handle_input(GoToInput::Negative),
                    KeyCode::Char('+') => state.handle_input(GoToInput::Positive),
                    KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        Some(d) => state.handle_input(GoToInput::Digit(d)),
                        None => GoToOutput::Invalid,
                    },
                    KeyCode::Backspace | KeyCode::Delete => {
                        state.handle_input(GoToInput::Backspace)
                    }
                    KeyCode::Enter => state.handle_input(GoToInput::Enter),
                    _ => GoToOutput::Invalid,
                };
                match output {
                    GoToOutput::Ok => true,
                    GoToOutput::Invalid => false,
                    GoToOutput::Jump(date) => {
                        self.state = AppState::Graphs;
                        self.go_to(date);
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn focused(&self) -> &GraphView<SelectionLog> {
        &self.graphs[self.focus]
    }

    fn focused_mut(&mut self) -> &mut GraphView<SelectionLog> {
        &mut self.graphs[self.focus]
    }

    /// Gives the first graph a fresh month of data, the second a new record
    /// for the current day, and moves the third one to a month in the near
    /// future
    fn refresh(&mut self, now: OffsetDateTime) {
        let now = now.to_offset(self.calendar.offset());
        let instant = Instant::now();
        let [first, second, third] = &mut self.graphs;
        let reference = first.state().reference_date();
        let records = month_of_records(reference, &self.calendar, &mut self.rng);
        first.set_records(records, reference, instant, &mut self.rng);
        let record = random_record(now, &mut self.rng);
        if second.update_record(record, instant, &mut self.rng).is_none() {
            log::debug!("{} is not on the second graph", now.date());
        }
        match random_future_date(now.date(), &mut self.rng) {
            Some(date) => third.set_reference_date(date, instant, &mut self.rng),
            None => log::warn!("No date to move the third graph to"),
        }
    }

    fn reset(&mut self) {
        let instant = Instant::now();
        for g in &mut self.graphs {
            g.set_reference_date(self.start, instant, &mut self.rng);
        }
    }

    fn go_to(&mut self, date: Date) {
        let instant = Instant::now();
        let view = &mut self.graphs[self.focus];
        view.set_reference_date(date, instant, &mut self.rng);
    }

    /// Focuses and taps whichever cell was drawn under the pointer
    fn click(&mut self, column: u16, row: u16) {
        if self.state != AppState::Graphs {
            return;
        }
        let hit = self
            .graphs
            .iter()
            .enumerate()
            .find_map(|(i, g)| Some((i, g.hit_test(column, row)?)));
        if let Some((i, index)) = hit {
            self.focus = i;
            self.graphs[i].tap(index);
        }
    }

    fn status_line(&self) -> Line<'static> {
        let handler = self.focused().state().handler();
        let selected = handler.last_day().zip(handler.last().map(|r| r.level));
        let text = match selected {
            Some((day, level)) => format!(
                " Selected {} {}, {}: {} ({} in total)",
                day.month(),
                day.day(),
                day.year(),
                level.name(),
                handler.count()
            ),
            None => String::from(" Nothing selected"),
        };
        Line::from(Span::styled(text, STATUS_STYLE))
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [graphs_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let columns: [Rect; GRAPH_COUNT] =
            Layout::horizontal([Constraint::Fill(1); GRAPH_COUNT]).areas(graphs_area);
        for (i, (view, column)) in zip(&mut self.graphs, columns).enumerate() {
            ContributionGraph::new(self.frame_time)
                .focused(i == self.focus)
                .render(column, buf, view);
        }
        self.status_line().render(status_area, buf);
        Line::from(Span::styled(KEY_HINTS, KEY_HINT_STYLE))
            .right_aligned()
            .render(status_area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::GoingTo(ref mut state) = self.state {
            GoTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Graphs,
    Helping,
    GoingTo(GoToState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn app() -> App {
        App::new(AppConfig {
            calendar: CalendarConfig::default(),
            start: date!(2020 - 02 - 15),
            base_color: GraphStyle::default().base_color,
            animate: false,
            seed: Some(42),
        })
    }

    fn render(app: &mut App) -> Buffer {
        let area = Rect::new(0, 0, 93, 14);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    #[test]
    fn test_graphs_share_initial_data() {
        let app = app();
        let first = app.graphs[0].state().cells();
        assert_eq!(first.len(), 35);
        for g in &app.graphs[1..] {
            assert_eq!(g.state().cells(), first);
        }
        assert!(!app.graphs[2].style().enable_reload_animation);
    }

    #[test]
    fn test_render_three_titled_graphs() {
        let mut app = app();
        let buf = render(&mut app);
        let top = row_text(&buf, 0);
        assert_eq!(top.matches(" February 2020 ").count(), 3, "{top:?}");
        let status = row_text(&buf, 13);
        assert!(status.starts_with(" Nothing selected"), "{status:?}");
        assert!(status.trim_end().ends_with("q quit"), "{status:?}");
        assert!(app.graphs.iter().all(|g| g.hit_test(0, 0).is_none()));
    }

    #[test]
    fn test_select_with_keyboard() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Enter));
        let last = app.graphs[0].state().handler().last().copied().unwrap();
        assert_eq!(
            last.day(&app.calendar),
            Some(date!(2020 - 02 - 02))
        );
        let status = app.status_line().to_string();
        assert!(
            status.starts_with(" Selected February 2, 2020: "),
            "{status:?}"
        );
        assert_eq!(app.graphs[1].state().handler().count(), 0);
    }

    #[test]
    fn test_cursor_stops_at_month_edge() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Left));
        assert!(!app.handle_key(KeyCode::Char('k')));
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.focus, 1);
        assert!(app.handle_key(KeyCode::BackTab));
        assert!(app.handle_key(KeyCode::BackTab));
        assert_eq!(app.focus, 2);
    }

    #[test]
    fn test_click_focuses_and_selects() {
        let mut app = app();
        render(&mut app);
        let cell = app.graphs[2].state().cells().leading_blanks();
        let (x, y) = (0..93u16)
            .flat_map(|x| (0..14u16).map(move |y| (x, y)))
            .find(|&(x, y)| app.graphs[2].hit_test(x, y) == Some(cell))
            .unwrap();
        app.click(x, y);
        assert_eq!(app.focus, 2);
        assert_eq!(app.graphs[2].state().handler().count(), 1);
        assert_eq!(app.graphs[0].state().handler().count(), 0);
    }

    #[test]
    fn test_refresh() {
        let mut app = app();
        let before = app.graphs[1].state().cells().clone();
        app.refresh(datetime!(2020-02-05 12:00 UTC));
        // The second graph only changes on the current day
        let second = app.graphs[1].state().cells();
        for (i, (old, new)) in zip(&before, second).enumerate() {
            if i != 10 {
                assert_eq!(old, new, "cell {i} changed");
            }
        }
        assert_eq!(second.get(10).map(|r| r.timestamp), Some(datetime!(2020-02-05 12:00 UTC)));
        // The third graph moves one to three months past the current day
        let moved = app.graphs[2].state().reference_date();
        let ahead = (moved - date!(2020 - 02 - 05)).whole_days();
        assert!((30..=90).contains(&ahead), "{ahead} days ahead");
        assert_eq!(app.graphs[0].state().reference_date(), date!(2020 - 02 - 15));
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut app = app();
        app.refresh(datetime!(2020-02-05 12:00 UTC));
        assert!(app.handle_key(KeyCode::Home));
        for g in &app.graphs {
            assert_eq!(g.state().reference_date(), date!(2020 - 02 - 15));
        }
    }

    #[test]
    fn test_go_to_month() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Tab));
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "202003".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Graphs);
        assert_eq!(app.graphs[1].state().cells().month(), Some((2020, time::Month::March)));
        assert_eq!(app.graphs[0].state().cells().month(), Some((2020, time::Month::February)));
    }

    #[test]
    fn test_go_to_cancel() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Graphs);
        assert!(!app.quitting());
    }

    #[test]
    fn test_help() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('?')));
        let buf = render(&mut app);
        let screen = (0..14).map(|y| row_text(&buf, y)).collect::<Vec<_>>();
        assert!(screen.iter().any(|l| l.contains(" Commands ")));
        assert!(screen.iter().any(|l| l.contains("Refresh with new data")));
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Graphs);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_monday_start_header() {
        let mut app = App::new(AppConfig {
            calendar: CalendarConfig::new(time::Weekday::Monday, time::UtcOffset::UTC),
            start: date!(2020 - 02 - 15),
            base_color: Color::Green,
            animate: true,
            seed: Some(1),
        });
        let buf = render(&mut app);
        let initials = row_text(&buf, 1)
            .chars()
            .filter(char::is_ascii_alphabetic)
            .take(7)
            .collect::<String>();
        assert_eq!(initials, "MTWTFSS");
        assert!(app.animating());
    }
}

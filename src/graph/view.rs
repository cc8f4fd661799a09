use super::fade::FadeAnimator;
use super::record::ActivityRecord;
use super::state::{GraphState, Refresh};
use super::style::GraphStyle;
use super::SelectionHandler;
use rand::Rng;
use ratatui::layout::{Position, Rect};
use std::time::Instant;
use time::Date;

/// Distance in cells between the same weekday of consecutive weeks
const WEEK_STRIDE: isize = 7;

/// Everything a [`ContributionGraph`](super::ContributionGraph) needs between
/// frames: the grid itself, its look, the running animation, the keyboard
/// cursor, and where the cells were last drawn
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GraphView<H> {
    state: GraphState<H>,
    style: GraphStyle,
    fade: FadeAnimator,
    cursor: usize,
    pub(super) cell_areas: Vec<Rect>,
}

impl<H: SelectionHandler> GraphView<H> {
    pub(crate) fn new(state: GraphState<H>, style: GraphStyle) -> Self {
        let mut view = GraphView {
            state,
            fade: FadeAnimator::new(style.enable_reload_animation),
            style,
            cursor: 0,
            cell_areas: Vec::new(),
        };
        view.clamp_cursor();
        view
    }

    pub(crate) fn state(&self) -> &GraphState<H> {
        &self.state
    }

    pub(crate) fn style(&self) -> &GraphStyle {
        &self.style
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn opacity(&self, index: usize, now: Instant) -> f64 {
        self.fade.opacity(index, now)
    }

    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        self.fade.is_running(now)
    }

    pub(crate) fn settle(&mut self, now: Instant) {
        self.fade.settle(now);
    }

    /// Replaces every record, reloading every cell
    pub(crate) fn set_records<R: Rng + ?Sized>(
        &mut self,
        records: Vec<ActivityRecord>,
        reference: Date,
        now: Instant,
        rng: &mut R,
    ) {
        let refresh = self.state.replace_all(records, reference);
        self.refresh(refresh, now, rng);
    }

    /// Shows a different month of the same records
    pub(crate) fn set_reference_date<R: Rng + ?Sized>(
        &mut self,
        reference: Date,
        now: Instant,
        rng: &mut R,
    ) {
        let refresh = self.state.set_reference_date(reference);
        self.refresh(refresh, now, rng);
    }

    /// Updates the cell for one record's day, if it is displayed
    pub(crate) fn update_record<R: Rng + ?Sized>(
        &mut self,
        record: ActivityRecord,
        now: Instant,
        rng: &mut R,
    ) -> Option<usize> {
        let index = self.state.update_one(record)?;
        self.refresh(Refresh::Cell(index), now, rng);
        Some(index)
    }

    fn refresh<R: Rng + ?Sized>(&mut self, refresh: Refresh, now: Instant, rng: &mut R) {
        match refresh {
            Refresh::All => {
                self.fade.reload(self.state.cells().len(), now, rng);
                self.clamp_cursor();
            }
            Refresh::Cell(index) => self.fade.single(index, now),
        }
    }

    pub(crate) fn tap(&mut self, index: usize) -> Option<ActivityRecord> {
        let record = self.state.tap(index)?;
        self.cursor = index;
        Some(record)
    }

    pub(crate) fn tap_cursor(&mut self) -> Option<ActivityRecord> {
        self.tap(self.cursor)
    }

    /// Moves the cursor by `dx` days and `dy` weeks.  Returns `false` if that
    /// would take it off the month.
    pub(crate) fn move_cursor(&mut self, dx: isize, dy: isize) -> bool {
        let step = dx + dy * WEEK_STRIDE;
        let Some(target) = self.cursor.checked_add_signed(step) else {
            return false;
        };
        match self.state.lookup(target) {
            Some(r) if !r.is_blank() => {
                self.cursor = target;
                true
            }
            _ => false,
        }
    }

    /// Index of the cell drawn at the given screen position during the last
    /// render
    pub(crate) fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        let pos = Position::new(x, y);
        self.cell_areas.iter().position(|r| r.contains(pos))
    }

    fn clamp_cursor(&mut self) {
        let cells = self.state.cells();
        let first = cells.leading_blanks();
        let last = cells.len().saturating_sub(1);
        self.cursor = self.cursor.clamp(first, last.max(first));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CalendarConfig, Level, SelectionLog};
    use rand::{rngs::StdRng, SeedableRng};
    use time::macros::{date, datetime};

    fn february(animate: bool) -> GraphView<SelectionLog> {
        let state = GraphState::new(
            CalendarConfig::default(),
            date!(2020 - 02 - 15),
            SelectionLog::default(),
        );
        GraphView::new(
            state,
            GraphStyle::default().enable_reload_animation(animate),
        )
    }

    #[test]
    fn test_cursor_starts_on_first_day() {
        let view = february(false);
        assert_eq!(view.cursor(), 6);
    }

    #[test]
    fn test_move_cursor_stays_in_month() {
        let mut view = february(false);
        assert!(!view.move_cursor(-1, 0));
        assert!(!view.move_cursor(0, -1));
        assert!(view.move_cursor(1, 0));
        assert_eq!(view.cursor(), 7);
        assert!(view.move_cursor(0, 3));
        assert_eq!(view.cursor(), 28);
        assert!(!view.move_cursor(0, 1));
        assert!(view.move_cursor(6, 0));
        assert_eq!(view.cursor(), 34);
        assert!(!view.move_cursor(1, 0));
    }

    #[test]
    fn test_tap_cursor_reports_selection() {
        let mut view = february(false);
        let rec = view.tap_cursor().unwrap();
        assert_eq!(rec.timestamp, datetime!(2020-02-01 00:00 UTC));
        assert_eq!(view.state().handler().count(), 1);
    }

    #[test]
    fn test_set_records_starts_reload_fade() {
        let now = Instant::now();
        let mut view = february(true);
        let mut rng = StdRng::seed_from_u64(3);
        let rec = ActivityRecord::new(datetime!(2020-02-05 00:00 UTC), Level::High);
        view.set_records(vec![rec], date!(2020 - 02 - 15), now, &mut rng);
        assert!(view.is_animating(now));
        assert_eq!(view.state().lookup(10), Some(&rec));
    }

    #[test]
    fn test_update_record_fades_single_cell() {
        let now = Instant::now();
        let mut view = february(true);
        let mut rng = StdRng::seed_from_u64(3);
        let rec = ActivityRecord::new(datetime!(2020-02-05 00:00 UTC), Level::Max);
        assert_eq!(view.update_record(rec, now, &mut rng), Some(10));
        assert!(view.opacity(10, now).abs() < f64::EPSILON);
        assert!((view.opacity(11, now) - 1.0).abs() < f64::EPSILON);
        let elsewhere = ActivityRecord::new(datetime!(2020-03-01 00:00 UTC), Level::Max);
        assert_eq!(view.update_record(elsewhere, now, &mut rng), None);
    }

    #[test]
    fn test_redate_clamps_cursor() {
        let now = Instant::now();
        let mut view = february(false);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(view.move_cursor(0, 4));
        assert_eq!(view.cursor(), 34);
        // March 2020 starts on a Sunday and has 31 days
        view.set_reference_date(date!(2020 - 03 - 01), now, &mut rng);
        assert_eq!(view.cursor(), 30);
        // April 2020 starts on a Wednesday
        view.set_reference_date(date!(2020 - 04 - 01), now, &mut rng);
        assert_eq!(view.cursor(), 30);
        view.set_reference_date(date!(2020 - 08 - 01), now, &mut rng);
        // August 2020 starts on a Saturday
        assert_eq!(view.cursor(), 30);
        assert!(!view.is_animating(now));
    }
}

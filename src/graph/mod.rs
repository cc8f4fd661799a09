mod builder;
mod calendar;
mod fade;
mod record;
mod state;
mod style;
mod view;
mod widget;
use time::Date;
pub(crate) use self::calendar::CalendarConfig;
pub(crate) use self::record::{ActivityRecord, Level};
pub(crate) use self::state::GraphState;
pub(crate) use self::style::{parse_color, GraphStyle};
pub(crate) use self::view::GraphView;
pub(crate) use self::widget::ContributionGraph;

/// Receives the record under every non-blank cell the user selects
pub(crate) trait SelectionHandler {
    fn cell_selected(&mut self, record: &ActivityRecord);
}

impl<T: SelectionHandler + ?Sized> SelectionHandler for &mut T {
    fn cell_selected(&mut self, record: &ActivityRecord) {
        (**self).cell_selected(record);
    }
}

/// A [`SelectionHandler`] that logs each selection and remembers the most
/// recent one.  Days are reported in the calendar the graph is drawn with.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SelectionLog {
    calendar: CalendarConfig,
    last: Option<ActivityRecord>,
    count: usize,
}

impl SelectionLog {
    pub(crate) fn new(calendar: CalendarConfig) -> SelectionLog {
        SelectionLog {
            calendar,
            last: None,
            count: 0,
        }
    }

    pub(crate) fn last(&self) -> Option<&ActivityRecord> {
        self.last.as_ref()
    }

    /// The calendar day of the most recent selection
    pub(crate) fn last_day(&self) -> Option<Date> {
        self.last.and_then(|r| r.day(&self.calendar))
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }
}

impl SelectionHandler for SelectionLog {
    fn cell_selected(&mut self, record: &ActivityRecord) {
        self.last = Some(*record);
        self.count += 1;
        match self.last_day() {
            Some(day) => log::info!("Selected {day} ({})", record.level.name()),
            None => log::info!("Selected {} ({})", record.timestamp, record.level.name()),
        }
    }
}

use super::calendar::CalendarConfig;
use super::record::{ActivityRecord, Level};
use log::{debug, warn};
use std::collections::HashMap;
use time::{Date, Month};

/// The cells of one month's graph: leading blanks followed by one record per
/// day of the month in ascending order
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct GridSequence {
    cells: Vec<ActivityRecord>,
    month: Option<(i32, Month)>,
}

impl GridSequence {
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&ActivityRecord> {
        self.cells.get(index)
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, ActivityRecord> {
        self.cells.iter()
    }

    /// The year and month depicted, or `None` for an empty sequence
    pub(crate) fn month(&self) -> Option<(i32, Month)> {
        self.month
    }

    pub(crate) fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|r| r.is_blank()).count()
    }

    /// Index of the first non-blank cell falling on the same day as `record`
    pub(crate) fn position_of(
        &self,
        record: &ActivityRecord,
        calendar: &CalendarConfig,
    ) -> Option<usize> {
        if record.is_blank() {
            return None;
        }
        self.cells
            .iter()
            .position(|r| !r.is_blank() && calendar.same_day(r.timestamp, record.timestamp))
    }

    /// Overwrites the cell at `index`.  Returns `false` if there is no such
    /// cell.
    pub(crate) fn replace(&mut self, index: usize, record: ActivityRecord) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a GridSequence {
    type Item = &'a ActivityRecord;
    type IntoIter = std::slice::Iter<'a, ActivityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lays `records` out over the month containing `reference`.
///
/// Days with no record get a synthesized [`Level::None`] record; where more
/// than one record falls on a day, the first one wins.  If the month cannot
/// be determined, the result is empty.
pub(crate) fn build(
    records: &[ActivityRecord],
    reference: Date,
    calendar: &CalendarConfig,
) -> GridSequence {
    let days = match calendar.month_days(reference) {
        Ok(days) => days,
        Err(e) => {
            warn!("Not building contribution grid: {e}");
            return GridSequence::default();
        }
    };
    let mut by_day = HashMap::with_capacity(records.len());
    for r in records {
        if let Some(day) = r.day(calendar) {
            by_day.entry(day).or_insert(*r);
        }
    }
    let mut cells = vec![ActivityRecord::blank(); days.weekday_offset()];
    cells.reserve(days.len());
    cells.extend(days.iter().map(|d| {
        by_day
            .get(&d)
            .copied()
            .unwrap_or_else(|| ActivityRecord::on_day(d, calendar, Level::None))
    }));
    debug!(
        "Built contribution grid from {}: {} blanks + {} days",
        days.first(),
        days.weekday_offset(),
        cells.len() - days.weekday_offset(),
    );
    GridSequence {
        cells,
        month: Some((days.year(), days.month())),
    }
}

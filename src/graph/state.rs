use super::builder::{build, GridSequence};
use super::calendar::CalendarConfig;
use super::record::ActivityRecord;
use super::SelectionHandler;
use log::debug;
use time::Date;

/// Which cells a render surface must redraw after a change
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Refresh {
    All,
    Cell(usize),
}

/// Owner of the grid a contribution graph displays.
///
/// The grid is only ever replaced wholesale or patched one cell at a time, so
/// a reader never observes a half-built month.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GraphState<H> {
    calendar: CalendarConfig,
    reference: Date,
    records: Vec<ActivityRecord>,
    cells: GridSequence,
    handler: H,
}

impl<H: SelectionHandler> GraphState<H> {
    pub(crate) fn new(calendar: CalendarConfig, reference: Date, handler: H) -> Self {
        GraphState {
            calendar,
            reference,
            records: Vec::new(),
            cells: build(&[], reference, &calendar),
            handler,
        }
    }

    /// Swaps out the selection handler
    pub(crate) fn with_handler<H2: SelectionHandler>(self, handler: H2) -> GraphState<H2> {
        GraphState {
            calendar: self.calendar,
            reference: self.reference,
            records: self.records,
            cells: self.cells,
            handler,
        }
    }

    pub(crate) fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    pub(crate) fn reference_date(&self) -> Date {
        self.reference
    }

    pub(crate) fn cells(&self) -> &GridSequence {
        &self.cells
    }

    pub(crate) fn handler(&self) -> &H {
        &self.handler
    }

    /// Replaces the full set of records and rebuilds the grid for the month
    /// containing `reference`
    pub(crate) fn replace_all(&mut self, records: Vec<ActivityRecord>, reference: Date) -> Refresh {
        self.records = records;
        self.reference = reference;
        self.rebuild()
    }

    /// Rebuilds the grid from the current records for the month containing
    /// `reference`
    pub(crate) fn set_reference_date(&mut self, reference: Date) -> Refresh {
        self.reference = reference;
        self.rebuild()
    }

    fn rebuild(&mut self) -> Refresh {
        self.cells = build(&self.records, self.reference, &self.calendar);
        Refresh::All
    }

    /// Replaces the cell for `record`'s day with `record`.
    ///
    /// Returns the index of the replaced cell, or `None` (leaving everything
    /// untouched) if the day is not in the grid.
    pub(crate) fn update_one(&mut self, record: ActivityRecord) -> Option<usize> {
        let Some(index) = self.cells.position_of(&record, &self.calendar) else {
            match record.day(&self.calendar) {
                Some(day) => debug!("Ignoring update for {day}: not in the displayed month"),
                None => debug!(
                    "Ignoring update for {}: no such day in the calendar",
                    record.timestamp
                ),
            }
            return None;
        };
        self.cells.replace(index, record);
        // Keep the source list in step so that a later rebuild doesn't revert
        // the update
        match self
            .records
            .iter_mut()
            .find(|r| !r.is_blank() && self.calendar.same_day(r.timestamp, record.timestamp))
        {
            Some(r) => *r = record,
            None => self.records.push(record),
        }
        debug!("Updated cell {index} to {}", record.level.name());
        Some(index)
    }

    pub(crate) fn lookup(&self, index: usize) -> Option<&ActivityRecord> {
        self.cells.get(index)
    }

    /// Reports the record at `index` to the selection handler, unless there
    /// is no such cell or it is a blank
    pub(crate) fn tap(&mut self, index: usize) -> Option<ActivityRecord> {
        let record = *self.cells.get(index)?;
        if record.is_blank() {
            return None;
        }
        self.handler.cell_selected(&record);
        Some(record)
    }
}

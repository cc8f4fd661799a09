use super::calendar::CalendarConfig;
use time::{Date, OffsetDateTime};

/// Bucketed magnitude of one day's activity
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) enum Level {
    /// Grid-alignment placeholder; not a real day
    Blank,
    None,
    Low,
    Medium,
    High,
    Max,
}

impl Level {
    /// The levels a real day can have, from least to most active
    pub(crate) const ACTIVE: [Level; 5] = [
        Level::None,
        Level::Low,
        Level::Medium,
        Level::High,
        Level::Max,
    ];

    pub(crate) fn is_blank(self) -> bool {
        self == Level::Blank
    }

    /// Opacity of the base tint used to draw a cell of this level, or `None`
    /// if the level is not drawn with the tint at all
    pub(crate) fn tint_alpha(self) -> Option<f64> {
        match self {
            Level::Blank | Level::None => None,
            Level::Low => Some(0.3),
            Level::Medium => Some(0.6),
            Level::High => Some(0.8),
            Level::Max => Some(1.0),
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Level::Blank => "blank",
            Level::None => "none",
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
            Level::Max => "max",
        }
    }
}

/// One calendar day's activity, or a blank placeholder
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct ActivityRecord {
    pub(crate) timestamp: OffsetDateTime,
    pub(crate) level: Level,
}

impl ActivityRecord {
    pub(crate) fn new(timestamp: OffsetDateTime, level: Level) -> Self {
        ActivityRecord { timestamp, level }
    }

    /// A record for midnight of `date` in the calendar's offset
    pub(crate) fn on_day(date: Date, calendar: &CalendarConfig, level: Level) -> Self {
        ActivityRecord::new(date.midnight().assume_offset(calendar.offset()), level)
    }

    // Blanks carry the epoch as a sentinel; nothing should ever read it.
    pub(crate) fn blank() -> Self {
        ActivityRecord::new(OffsetDateTime::UNIX_EPOCH, Level::Blank)
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.level.is_blank()
    }

    /// The calendar day of this record, or `None` for blanks, which have no
    /// day to be matched against
    pub(crate) fn day(&self, calendar: &CalendarConfig) -> Option<Date> {
        if self.is_blank() {
            return None;
        }
        calendar.day_of(self.timestamp)
    }
}

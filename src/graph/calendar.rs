use std::iter::successors;
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, UtcOffset, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Number of days from `start` forwards to `self`, in `0..7`
    fn days_since(&self, start: Weekday) -> u8;

    /// Single-letter label for a grid header
    fn initial(&self) -> &'static str;
}

impl WeekdayExt for Weekday {
    fn days_since(&self, start: Weekday) -> u8 {
        (self.number_days_from_monday() + 7 - start.number_days_from_monday()) % 7
    }

    fn initial(&self) -> &'static str {
        match self {
            Weekday::Monday => "M",
            Weekday::Tuesday | Weekday::Thursday => "T",
            Weekday::Wednesday => "W",
            Weekday::Friday => "F",
            Weekday::Saturday | Weekday::Sunday => "S",
        }
    }
}

/// The calendar conventions a graph is laid out with.
///
/// All date arithmetic goes through here rather than through the process's
/// locale, so that grids come out the same regardless of where they are
/// built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarConfig {
    week_start: Weekday,
    offset: UtcOffset,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig::new(Weekday::Sunday, UtcOffset::UTC)
    }
}

impl CalendarConfig {
    pub(crate) fn new(week_start: Weekday, offset: UtcOffset) -> Self {
        CalendarConfig { week_start, offset }
    }

    pub(crate) fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// The weekdays in column order
    pub(crate) fn weekdays(&self) -> [Weekday; DAYS_IN_WEEK] {
        let mut wd = self.week_start;
        std::array::from_fn(|_| {
            let this = wd;
            wd = wd.next();
            this
        })
    }

    /// Zero-based column of `date` in a week beginning on `week_start`
    pub(crate) fn weekday_offset(&self, date: Date) -> u8 {
        date.weekday().days_since(self.week_start)
    }

    /// The calendar day `timestamp` falls on in this calendar's offset, or
    /// `None` if that day is beyond the range of representable dates
    pub(crate) fn day_of(&self, timestamp: OffsetDateTime) -> Option<Date> {
        timestamp.checked_to_offset(self.offset).map(OffsetDateTime::date)
    }

    /// Whether both timestamps fall on the same representable day
    pub(crate) fn same_day(&self, a: OffsetDateTime, b: OffsetDateTime) -> bool {
        match (self.day_of(a), self.day_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    pub(crate) fn today(&self) -> Date {
        let now = OffsetDateTime::now_utc();
        self.day_of(now).unwrap_or_else(|| now.date())
    }

    /// Midnight at the start of `date` in this calendar's offset, provided
    /// that moment is a representable instant
    pub(crate) fn midnight(&self, date: Date) -> Option<OffsetDateTime> {
        let ts = date.midnight().assume_offset(self.offset);
        ts.checked_to_offset(UtcOffset::UTC).map(|_| ts)
    }

    /// The month containing `reference`.  Fails if the month's first or last
    /// day does not begin at a representable instant in this calendar's
    /// offset, as then its days cannot be given timestamps.
    pub(crate) fn month_days(&self, reference: Date) -> Result<MonthDays, CalendarError> {
        let first = reference
            .replace_day(1)
            .map_err(|_| CalendarError::OutOfRange(reference))?;
        let days = MonthDays {
            first,
            weekday_offset: self.weekday_offset(first),
        };
        let last = days.iter().last().unwrap_or(first);
        for d in [first, last] {
            if self.midnight(d).is_none() {
                return Err(CalendarError::OutOfRange(d));
            }
        }
        Ok(days)
    }
}

/// The days of one calendar month together with where the month starts in
/// the week
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthDays {
    first: Date,
    weekday_offset: u8,
}

impl MonthDays {
    pub(crate) fn first(&self) -> Date {
        self.first
    }

    pub(crate) fn year(&self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(&self) -> Month {
        self.first.month()
    }

    pub(crate) fn weekday_offset(&self) -> usize {
        usize::from(self.weekday_offset)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Date> {
        let month = self.first.month();
        iter_days_from(self.first).take_while(move |d| d.month() == month)
    }

    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum CalendarError {
    #[error("{0} cannot be expressed as an instant in the calendar's offset")]
    OutOfRange(Date),
}

fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset};
    use time::Weekday::*;

    #[test]
    fn test_days_since() {
        assert_eq!(Sunday.days_since(Sunday), 0);
        assert_eq!(Saturday.days_since(Sunday), 6);
        assert_eq!(Sunday.days_since(Monday), 6);
        assert_eq!(Monday.days_since(Monday), 0);
        assert_eq!(Wednesday.days_since(Thursday), 6);
    }

    #[test]
    fn test_weekdays_sunday_start() {
        let cal = CalendarConfig::default();
        assert_eq!(
            cal.weekdays(),
            [Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday]
        );
    }

    #[test]
    fn test_weekdays_monday_start() {
        let cal = CalendarConfig::new(Monday, UtcOffset::UTC);
        assert_eq!(
            cal.weekdays(),
            [Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday]
        );
    }

    #[test]
    fn test_month_days_february_2020() {
        let cal = CalendarConfig::default();
        let days = cal.month_days(date!(2020 - 02 - 15)).unwrap();
        assert_eq!(days.first(), date!(2020 - 02 - 01));
        assert_eq!(days.weekday_offset(), 6);
        assert_eq!(days.len(), 29);
        assert_eq!(days.iter().last(), Some(date!(2020 - 02 - 29)));
    }

    #[test]
    fn test_month_days_monday_start() {
        let cal = CalendarConfig::new(Monday, UtcOffset::UTC);
        let days = cal.month_days(date!(2020 - 02 - 15)).unwrap();
        assert_eq!(days.weekday_offset(), 5);
    }

    #[test]
    fn test_month_days_lengths() {
        let cal = CalendarConfig::default();
        assert_eq!(cal.month_days(date!(2019 - 02 - 01)).unwrap().len(), 28);
        assert_eq!(cal.month_days(date!(2021 - 04 - 30)).unwrap().len(), 30);
        assert_eq!(cal.month_days(date!(2021 - 12 - 31)).unwrap().len(), 31);
    }

    #[test]
    fn test_month_days_at_end_of_time() {
        let cal = CalendarConfig::default();
        let days = cal.month_days(Date::MAX).unwrap();
        assert_eq!(days.iter().last(), Some(Date::MAX));
    }

    #[test]
    fn test_month_before_start_of_time() {
        // Midnight on the first representable day at +9 is still the previous
        // day in UTC
        let cal = CalendarConfig::new(Sunday, offset!(+9));
        assert_eq!(
            cal.month_days(Date::MIN),
            Err(CalendarError::OutOfRange(Date::MIN))
        );
        let cal = CalendarConfig::new(Sunday, offset!(-9));
        assert!(cal.month_days(Date::MIN).is_ok());
    }

    #[test]
    fn test_day_of_out_of_range() {
        let cal = CalendarConfig::new(Sunday, offset!(+9));
        assert_eq!(cal.day_of(datetime!(9999-12-31 23:00 UTC)), None);
        assert_eq!(
            cal.day_of(datetime!(9999-12-31 14:00 UTC)),
            Some(date!(9999 - 12 - 31))
        );
        assert!(!cal.same_day(
            datetime!(9999-12-31 23:00 UTC),
            datetime!(9999-12-31 23:00 UTC)
        ));
    }

    #[test]
    fn test_midnight() {
        let cal = CalendarConfig::new(Sunday, offset!(+9));
        assert_eq!(
            cal.midnight(date!(2020 - 01 - 22)),
            Some(datetime!(2020-01-22 00:00 +9))
        );
        assert_eq!(cal.midnight(Date::MIN), None);
    }

    #[test]
    fn test_same_day_ignores_time() {
        let cal = CalendarConfig::default();
        assert!(cal.same_day(
            datetime!(2020-02-05 00:00 UTC),
            datetime!(2020-02-05 23:59:59 UTC)
        ));
        assert!(!cal.same_day(
            datetime!(2020-02-05 23:59:59 UTC),
            datetime!(2020-02-06 00:00 UTC)
        ));
    }

    #[test]
    fn test_same_day_across_offsets() {
        let cal = CalendarConfig::new(Sunday, offset!(+9));
        assert!(cal.same_day(
            datetime!(2020-02-05 16:00 UTC),
            datetime!(2020-02-06 08:00 +9)
        ));
    }
}

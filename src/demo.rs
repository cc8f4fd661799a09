//! Random data for the demo screen
use crate::graph::{ActivityRecord, CalendarConfig, Level};
use rand::{seq::SliceRandom, Rng};
use time::{Date, Duration, OffsetDateTime};

/// How far ahead, in days, a re-dated graph may jump
const REDATE_RANGE: std::ops::RangeInclusive<i64> = 30..=90;

pub(crate) fn random_level<R: Rng + ?Sized>(rng: &mut R) -> Level {
    Level::ACTIVE.choose(rng).copied().unwrap_or(Level::None)
}

/// A record with a random level for every day of the month containing
/// `reference`
pub(crate) fn month_of_records<R: Rng + ?Sized>(
    reference: Date,
    calendar: &CalendarConfig,
    rng: &mut R,
) -> Vec<ActivityRecord> {
    let Ok(days) = calendar.month_days(reference) else {
        return Vec::new();
    };
    days.iter()
        .map(|d| ActivityRecord::on_day(d, calendar, random_level(rng)))
        .collect()
}

/// A record for the moment `now` with a random level
pub(crate) fn random_record<R: Rng + ?Sized>(now: OffsetDateTime, rng: &mut R) -> ActivityRecord {
    ActivityRecord::new(now, random_level(rng))
}

/// A date one to three months after `today`
pub(crate) fn random_future_date<R: Rng + ?Sized>(today: Date, rng: &mut R) -> Option<Date> {
    today.checked_add(Duration::days(rng.gen_range(REDATE_RANGE)))
}

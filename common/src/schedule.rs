// Invocation point calculation and sequence generation
//
// Year/month/day boundaries are walked on the local wall clock and resolved
// in the task's timezone at every step, so DST changes never shift later
// points. Hour boundaries live on the absolute timeline and advance by fixed
// durations.

use crate::errors::PeriodicTaskError;
use crate::models::{Period, PeriodUnit, PtList};
use crate::timestamp::format_timestamp;
use chrono::{
    DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

/// Position of the generator between two invocation points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Calendar boundary on the local wall clock (year, month and day units)
    Local(NaiveDateTime),
    /// Absolute instant (hour unit)
    Instant(DateTime<Utc>),
}

impl Cursor {
    /// First boundary of `unit` strictly after `start`
    fn first(unit: PeriodUnit, start: &DateTime<Tz>) -> Option<Cursor> {
        let date = start.date_naive();

        let boundary = match unit {
            PeriodUnit::Year => NaiveDate::from_ymd_opt(date.year().checked_add(1)?, 1, 1)?,
            PeriodUnit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?
                .checked_add_months(Months::new(1))?,
            PeriodUnit::Day => date.succ_opt()?,
            PeriodUnit::Hour => {
                let wall = start.time();
                let into_hour = Duration::minutes(i64::from(wall.minute()))
                    + Duration::seconds(i64::from(wall.second()))
                    + Duration::nanoseconds(i64::from(wall.nanosecond()));

                let next = start
                    .with_timezone(&Utc)
                    .checked_sub_signed(into_hour)?
                    .checked_add_signed(Duration::hours(1))?;
                return Some(Cursor::Instant(next));
            }
        };

        Some(Cursor::Local(boundary.and_time(NaiveTime::MIN)))
    }

    /// Move the cursor forward by one period
    fn advance(self, period: Period) -> Option<Cursor> {
        let value = period.value;

        match self {
            Cursor::Instant(at) => at
                .checked_add_signed(Duration::hours(i64::from(value)))
                .map(Cursor::Instant),
            Cursor::Local(wall) => {
                let next = match period.unit {
                    PeriodUnit::Year => wall.checked_add_months(Months::new(value.checked_mul(12)?)),
                    PeriodUnit::Month => wall.checked_add_months(Months::new(value)),
                    PeriodUnit::Day => wall.checked_add_days(Days::new(u64::from(value))),
                    PeriodUnit::Hour => {
                        wall.checked_add_signed(Duration::hours(i64::from(value)))
                    }
                };
                next.map(Cursor::Local)
            }
        }
    }

    fn resolve(self, timezone: &Tz) -> Option<DateTime<Tz>> {
        match self {
            Cursor::Instant(at) => Some(at.with_timezone(timezone)),
            Cursor::Local(wall) => resolve_local(timezone, wall),
        }
    }
}

/// Map a local wall-clock time onto the timeline of `timezone`
///
/// Ambiguous times (DST fall-back) resolve to the earliest instant. Times
/// inside a DST gap are read with the offset in effect before the gap, which
/// lands on the instant the gap ends.
fn resolve_local(timezone: &Tz, wall: NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(resolved) = timezone.from_local_datetime(&wall).earliest() {
        return Some(resolved);
    }

    let before_gap = wall.checked_sub_signed(Duration::days(1))?;
    let offset = timezone
        .offset_from_local_datetime(&before_gap)
        .earliest()?
        .fix();
    let utc = wall.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;

    Some(timezone.from_utc_datetime(&utc))
}

/// First boundary cursor after `start` together with its resolved instant
fn first_point(
    unit: PeriodUnit,
    start: &DateTime<Tz>,
) -> Result<(Cursor, DateTime<Tz>), PeriodicTaskError> {
    let timezone = start.timezone();

    Cursor::first(unit, start)
        .and_then(|cursor| cursor.resolve(&timezone).map(|point| (cursor, point)))
        .ok_or_else(|| {
            PeriodicTaskError::Internal(format!("no {} boundary after {}", unit, start))
        })
}

/// Compute the first calendar boundary of `unit` strictly after `start`,
/// expressed in the timezone of `start`
#[tracing::instrument(level = "trace")]
pub fn invocation_point(
    unit: PeriodUnit,
    start: &DateTime<Tz>,
) -> Result<DateTime<Tz>, PeriodicTaskError> {
    first_point(unit, start).map(|(_, point)| point)
}

/// A periodic task anchored at its first invocation point
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicTask {
    pub period: Period,
    pub invocation_point: DateTime<Tz>,
    pub timezone: Tz,
    cursor: Cursor,
}

impl PeriodicTask {
    /// Anchor a task with the given period at the first boundary after
    /// `start_point`, evaluated in `timezone`
    #[tracing::instrument(level = "trace")]
    pub fn new(
        period: Period,
        timezone: Tz,
        start_point: DateTime<Tz>,
    ) -> Result<Self, PeriodicTaskError> {
        let start = start_point.with_timezone(&timezone);

        let (cursor, invocation_point) = first_point(period.unit, &start)?;

        Ok(Self {
            period,
            invocation_point,
            timezone,
            cursor,
        })
    }

    /// Every invocation point of the task, starting with the first one
    ///
    /// The sequence only ends when the calendar runs out of range.
    pub fn points(&self) -> InvocationPoints {
        InvocationPoints {
            period: self.period,
            timezone: self.timezone,
            cursor: Some(self.cursor),
            last: None,
        }
    }

    /// Invocation points strictly before `end`
    pub fn points_until(&self, end: DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        self.points().take_while(move |point| *point < end)
    }

    /// UTC-formatted invocation timestamps strictly before `end`
    pub fn list_until(&self, end: DateTime<Tz>) -> PtList {
        self.points_until(end)
            .map(|point| format_timestamp(&point))
            .collect()
    }

    /// Like [`PeriodicTask::list_until`], but fails once more than
    /// `max_points` timestamps would be produced
    pub fn list_until_bounded(
        &self,
        end: DateTime<Tz>,
        max_points: usize,
    ) -> Result<PtList, PeriodicTaskError> {
        let mut list = PtList::new();

        for point in self.points_until(end) {
            if list.len() == max_points {
                tracing::debug!(
                    period = %self.period,
                    max_points = max_points,
                    "Invocation point limit reached"
                );
                return Err(PeriodicTaskError::TooManyPoints { limit: max_points });
            }
            list.push(format_timestamp(&point));
        }

        Ok(list)
    }
}

/// Iterator over the invocation points of a [`PeriodicTask`]
#[derive(Debug, Clone)]
pub struct InvocationPoints {
    period: Period,
    timezone: Tz,
    cursor: Option<Cursor>,
    last: Option<DateTime<Tz>>,
}

impl Iterator for InvocationPoints {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cursor = self.cursor?;
            let point = cursor.resolve(&self.timezone);

            self.cursor = match point {
                Some(_) => cursor.advance(self.period),
                None => None,
            };

            let point = point?;

            // A skipped calendar day resolves onto the following boundary
            if self.last.is_some_and(|last| point <= last) {
                continue;
            }

            self.last = Some(point);
            return Some(point);
        }
    }
}

/// Generate the UTC timestamps at which a task with `period` fires between
/// `start_point` and `end_point` (exclusive) in `timezone`
#[tracing::instrument(level = "trace")]
pub fn generate_list(
    period: Period,
    timezone: Tz,
    start_point: DateTime<Tz>,
    end_point: DateTime<Tz>,
) -> Result<PtList, PeriodicTaskError> {
    let task = PeriodicTask::new(period, timezone, start_point)?;
    Ok(task.list_until(end_point))
}

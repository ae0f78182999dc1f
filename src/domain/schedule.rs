//! Daily trigger time and next-firing computation

use crate::error::{JournalBotError, Result};
use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn hhmm_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap())
}

/// Time of day at which the recurring trigger fires (24-hour clock)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTime {
    time: NaiveTime,
}

impl ScheduleTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| ScheduleTime { time })
            .ok_or_else(|| {
                JournalBotError::InvalidScheduleTime(format!("{:02}:{:02}", hour, minute))
            })
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// First wall-clock instant strictly after `now` that matches this time.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.time);
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }

    /// Next trigger in the local time zone.
    ///
    /// A trigger inside a DST gap moves forward by the gap; an ambiguous
    /// trigger resolves to the earlier instant. When that instant has
    /// already passed (the clocks went back after today's run) the trigger
    /// moves to the next day, so it fires at most once per calendar day.
    pub fn next_local_after(&self, now: DateTime<Local>) -> DateTime<Local> {
        self.next_resolved_after(now, |naive| Local.from_local_datetime(naive))
    }

    fn next_resolved_after<F>(&self, now: DateTime<Local>, resolve: F) -> DateTime<Local>
    where
        F: Fn(&NaiveDateTime) -> LocalResult<DateTime<Local>>,
    {
        let naive = self.next_after(now.naive_local());
        let next = resolve_local(naive, now, &resolve);
        if next > now {
            next
        } else {
            resolve_local(naive + Duration::days(1), now, &resolve)
        }
    }
}

fn resolve_local<F>(
    mut naive: NaiveDateTime,
    now: DateTime<Local>,
    resolve: &F,
) -> DateTime<Local>
where
    F: Fn(&NaiveDateTime) -> LocalResult<DateTime<Local>>,
{
    // DST gaps are at most a couple of hours; step forward until the wall
    // clock exists again.
    for _ in 0..=180 {
        match resolve(&naive) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => naive += Duration::minutes(1),
        }
    }
    now + Duration::days(1)
}

impl FromStr for ScheduleTime {
    type Err = JournalBotError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let captures = hhmm_regex()
            .captures(trimmed)
            .ok_or_else(|| JournalBotError::InvalidScheduleTime(s.to_string()))?;

        let hour = captures[1]
            .parse()
            .map_err(|_| JournalBotError::InvalidScheduleTime(s.to_string()))?;
        let minute = captures[2]
            .parse()
            .map_err(|_| JournalBotError::InvalidScheduleTime(s.to_string()))?;

        ScheduleTime::new(hour, minute)
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

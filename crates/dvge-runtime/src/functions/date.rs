//! Date built-ins and the clock they read
//!
//! Dates are read with the configured date format (default `%Y-%m-%d`).
//! Unreadable dates make `age` and `days_since` return 0.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use dvge_core::Value;
use std::fmt::{self, Write};

/// Format of `now()`
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of `today()`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the current local time
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed instant, for tests and previews
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midnight at the start of `date`
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::default()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Render chrono's delayed format, or `None` if the format string is invalid
fn render(formatted: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}

/// Read a date from a string value using `format`, also accepting `now()` output
pub fn parse_date(value: &Value, format: &str) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    NaiveDate::parse_from_str(text, format)
        .or_else(|_| NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).map(|dt| dt.date()))
        .ok()
}

pub fn now(clock: &dyn Clock) -> Value {
    Value::String(render(clock.now().format(DATETIME_FORMAT)).unwrap_or_default())
}

pub fn today(clock: &dyn Clock) -> Value {
    Value::String(render(clock.today().format(DATE_FORMAT)).unwrap_or_default())
}

/// Whole years since `birth_date`
pub fn age(birth_date: &Value, clock: &dyn Clock, format: &str) -> Value {
    let Some(birth) = parse_date(birth_date, format) else {
        tracing::debug!("age(): unreadable date {:?}", birth_date);
        return Value::Integer(0);
    };
    let today = clock.today();
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    Value::Integer(i64::from(today.year() - birth.year()) - i64::from(before_birthday))
}

/// Days elapsed since `date`; negative for future dates
pub fn days_since(date: &Value, clock: &dyn Clock, format: &str) -> Value {
    let Some(past) = parse_date(date, format) else {
        tracing::debug!("days_since(): unreadable date {:?}", date);
        return Value::Integer(0);
    };
    Value::Integer((clock.today() - past).num_days())
}

/// Reformat a date; unreadable input comes back as its display form
pub fn format_date(date: &Value, output_format: Option<&str>, input_format: &str) -> Value {
    let output_format = output_format.unwrap_or(input_format);
    parse_date(date, input_format)
        .and_then(|parsed| render(parsed.format(output_format)))
        .map(Value::String)
        .unwrap_or_else(|| Value::String(date.to_string()))
}

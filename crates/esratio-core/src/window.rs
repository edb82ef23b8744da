use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed 31-day month approximation used for window arithmetic.
const MONTH_SECS: i64 = 31 * 86_400;

/// Relative time-window specification.
///
/// All components are additive and independently optional, each defaulting
/// to zero. The offset shifts the window end back from the reference
/// instant; the remaining components set the window length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Minutes to shift the window end back from the reference instant.
    #[serde(default)]
    pub offset_minutes: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub weeks: u32,
    #[serde(default)]
    pub months: u32,
}

impl WindowSpec {
    /// Total window length in seconds. Months use a fixed 31-day
    /// approximation.
    pub fn duration_secs(&self) -> i64 {
        i64::from(self.minutes) * 60
            + i64::from(self.hours) * 3_600
            + i64::from(self.days) * 86_400
            + i64::from(self.weeks) * 604_800
            + i64::from(self.months) * MONTH_SECS
    }

    /// Resolve to absolute instants relative to `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> TimeWindow {
        let end = now - Duration::minutes(i64::from(self.offset_minutes));
        let start = end - Duration::seconds(self.duration_secs());
        TimeWindow { start, end }
    }
}

/// Absolute time window. `start <= end` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Render a possibly time-templated index selector into the concrete
    /// comma-joined index list covering the window.
    ///
    /// Selectors with strftime tokens (e.g. `logstash-%Y.%m.%d`) produce
    /// one index per day the window touches, deduplicated in order.
    /// Selectors without tokens pass through unchanged.
    pub fn render_index(&self, selector: &str) -> String {
        if !selector.contains('%') {
            return selector.to_string();
        }
        let mut rendered: Vec<String> = Vec::new();
        let mut cursor = self.start;
        let last_day = self.end.date_naive();
        while cursor.date_naive() <= last_day {
            let name = cursor.format(selector).to_string();
            if !rendered.contains(&name) {
                rendered.push(name);
            }
            cursor = cursor + Duration::days(1);
        }
        rendered.join(",")
    }
}

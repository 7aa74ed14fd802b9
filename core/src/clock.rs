use serde::{Deserialize, Serialize};

pub const CLOCK_REFRESH_MS_DEFAULT: u32 = 1000;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    pub refresh_ms: u32,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            refresh_ms: CLOCK_REFRESH_MS_DEFAULT,
        }
    }
}

/// Local wall-clock fields, numbered the way `Date` reports them
/// (`weekday` 0 = Sunday, `month` 0 = January).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockReading {
    pub weekday: u32,
    pub month: u32,
    pub day: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

pub fn format_time(reading: &ClockReading) -> String {
    let hours = reading.hours % 24;
    let suffix = if hours < 12 { "AM" } else { "PM" };
    let hour12 = match hours % 12 {
        0 => 12,
        value => value,
    };
    format!(
        "{hour12:02}:{:02}:{:02} {suffix}",
        reading.minutes % 60,
        reading.seconds % 60
    )
}

pub fn format_date(reading: &ClockReading) -> String {
    let weekday = WEEKDAYS[(reading.weekday % 7) as usize];
    let month = MONTHS[(reading.month % 12) as usize];
    format!("{weekday}, {month} {}", reading.day)
}

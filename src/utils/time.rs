// Clock-face helpers for minutes-from-midnight values

use chrono::{Local, Timelike};

/// Format minutes from midnight as HH:MM.
pub fn to_hhmm(minutes: i32) -> String {
    let h = minutes.div_euclid(60);
    let m = minutes.rem_euclid(60);
    format!("{:02}:{:02}", h, m)
}

/// Format a half-open minute interval for display.
pub fn format_range(start_min: i32, end_min: i32) -> String {
    format!("{} - {}", to_hhmm(start_min), to_hhmm(end_min))
}

/// Local wall-clock time as minutes from midnight.
pub fn now_minutes() -> i32 {
    let now = Local::now();
    (now.hour() * 60 + now.minute()) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hhmm() {
        assert_eq!(to_hhmm(0), "00:00");
        assert_eq!(to_hhmm(570), "09:30");
        assert_eq!(to_hhmm(1200), "20:00");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(600, 690), "10:00 - 11:30");
    }
}

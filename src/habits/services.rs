use time::{Date, OffsetDateTime, Time};

/// Tokens debited to create a habit, credited back in full on deletion.
pub const HABIT_FEE: i64 = 5000;
/// Tokens earned per daily completion, revoked when the day is unchecked.
pub const COMPLETION_REWARD: i64 = 500;

/// Today's calendar date and weekday index (0=Sunday..6=Saturday).
/// One clock for both: UTC, so the weekday filter and the completion
/// log can never disagree about what day it is.
pub fn today_utc() -> (Date, u8) {
    let now = OffsetDateTime::now_utc();
    (now.date(), now.weekday().number_days_from_sunday())
}

pub fn is_scheduled_on(days: &[i16], weekday: u8) -> bool {
    days.contains(&(weekday as i16))
}

/// Parses a wall-clock `HH:MM` string as submitted by the client.
pub fn parse_wall_time(s: &str) -> Option<Time> {
    let (h, m) = s.split_once(':')?;
    let h: u8 = h.parse().ok()?;
    let m: u8 = m.parse().ok()?;
    Time::from_hms(h, m, 0).ok()
}

/// Flips the completion state for `today`: removes the entry if present,
/// appends it otherwise. Returns the new state, true = checked.
pub fn toggle_completion(dates: &mut Vec<Date>, today: Date) -> bool {
    if let Some(pos) = dates.iter().position(|d| *d == today) {
        dates.remove(pos);
        false
    } else {
        dates.push(today);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn toggle_is_its_own_inverse_within_a_day() {
        let today = date!(2024 - 07 - 15);
        let mut dates = vec![date!(2024 - 07 - 13)];

        assert!(toggle_completion(&mut dates, today));
        assert_eq!(dates.len(), 2);

        assert!(!toggle_completion(&mut dates, today));
        assert_eq!(dates, vec![date!(2024 - 07 - 13)]);
    }

    #[test]
    fn toggle_matches_by_calendar_date_only() {
        let today = date!(2024 - 07 - 15);
        let mut dates = vec![today];
        // same date already present regardless of when it was pushed
        assert!(!toggle_completion(&mut dates, today));
        assert!(dates.is_empty());
    }

    #[test]
    fn scheduling_filter_by_weekday_index() {
        let days = vec![1, 3, 5]; // Mon/Wed/Fri
        assert!(is_scheduled_on(&days, 1));
        assert!(is_scheduled_on(&days, 3));
        assert!(is_scheduled_on(&days, 5));
        assert!(!is_scheduled_on(&days, 0));
        assert!(!is_scheduled_on(&days, 6));
    }

    #[test]
    fn parses_wall_clock_times() {
        use time::macros::time;
        assert_eq!(parse_wall_time("08:00"), Some(time!(8:00)));
        assert_eq!(parse_wall_time("23:59"), Some(time!(23:59)));
        assert_eq!(parse_wall_time("24:00"), None);
        assert_eq!(parse_wall_time("8"), None);
        assert_eq!(parse_wall_time("ab:cd"), None);
        assert_eq!(parse_wall_time("08:60"), None);
    }

    #[test]
    fn today_utc_is_consistent() {
        let (date, weekday) = today_utc();
        assert_eq!(date.weekday().number_days_from_sunday(), weekday);
        assert!(weekday <= 6);
    }

    #[test]
    fn ledger_constants() {
        assert_eq!(HABIT_FEE, 5000);
        assert_eq!(COMPLETION_REWARD, 500);
    }
}

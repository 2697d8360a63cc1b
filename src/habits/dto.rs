use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::habits::repo_types::Habit;

const TIME_FMT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");
const DATE_FMT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Request body for creating a habit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitRequest {
    pub habit: String,
    pub days: Vec<i16>,
    pub start_time: String,
    pub end_time: String,
    pub note: Option<String>,
}

/// Habit as returned to the client; times are `HH:MM`, completion
/// entries are plain calendar dates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDetails {
    pub id: Uuid,
    pub habit: String,
    pub days: Vec<i16>,
    pub start_time: String,
    pub end_time: String,
    pub note: Option<String>,
    pub completion_dates: Vec<String>,
    pub date_created: OffsetDateTime,
}

impl From<&Habit> for HabitDetails {
    fn from(h: &Habit) -> Self {
        Self {
            id: h.id,
            habit: h.habit.clone(),
            days: h.days.clone(),
            start_time: h.start_time.format(TIME_FMT).unwrap_or_default(),
            end_time: h.end_time.format(TIME_FMT).unwrap_or_default(),
            note: h.note.clone(),
            completion_dates: h
                .completion_dates
                .iter()
                .map(|d| d.format(DATE_FMT).unwrap_or_default())
                .collect(),
            date_created: h.created_at,
        }
    }
}

/// Plain `{message, statusCode}` envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub message: String,
    pub status_code: u16,
}

/// Response for the list endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitListResponse {
    pub message: String,
    pub status_code: u16,
    pub habits: Vec<HabitDetails>,
}

/// Response after creating a habit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedHabitResponse {
    pub message: String,
    pub status_code: u16,
    pub habit: HabitDetails,
}

/// Response after toggling a habit's completion for today.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub message: String,
    pub status_code: u16,
    pub checked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    fn sample_habit() -> Habit {
        Habit {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            habit: "Read".into(),
            days: vec![1, 2],
            start_time: time!(08:00),
            end_time: time!(08:30),
            note: None,
            completion_dates: vec![date!(2024 - 07 - 15)],
            created_at: datetime!(2024-07-01 12:00 UTC),
        }
    }

    #[test]
    fn details_format_times_and_dates() {
        let details = HabitDetails::from(&sample_habit());
        assert_eq!(details.start_time, "08:00");
        assert_eq!(details.end_time, "08:30");
        assert_eq!(details.completion_dates, vec!["2024-07-15".to_string()]);
    }

    #[test]
    fn list_response_serializes_with_envelope_keys() {
        let body = HabitListResponse {
            message: "Habits fetched successfully".into(),
            status_code: 200,
            habits: vec![HabitDetails::from(&sample_habit())],
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"statusCode\":200"));
        assert!(json.contains("\"habits\":["));
        assert!(json.contains("\"startTime\":\"08:00\""));
        assert!(json.contains("\"completionDates\":[\"2024-07-15\"]"));
    }

    #[test]
    fn create_request_accepts_camel_case() {
        let req: CreateHabitRequest = serde_json::from_str(
            r#"{"habit":"Read","days":[1,3,5],"startTime":"08:00","endTime":"08:30"}"#,
        )
        .unwrap();
        assert_eq!(req.days, vec![1, 3, 5]);
        assert_eq!(req.start_time, "08:00");
        assert!(req.note.is_none());
    }
}

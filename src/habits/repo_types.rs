use sqlx::FromRow;
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

/// Habit record in the database. The weekday set and the completion log
/// are array columns so the row keeps the shape of a single document.
#[derive(Debug, Clone, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub habit: String,
    /// Weekday indexes the habit recurs on, 0=Sunday..6=Saturday.
    pub days: Vec<i16>,
    pub start_time: Time,
    pub end_time: Time,
    pub note: Option<String>,
    /// One entry per calendar day the habit was marked done.
    pub completion_dates: Vec<Date>,
    pub created_at: OffsetDateTime,
}

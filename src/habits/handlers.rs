use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use time::Time;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::RequireUser;
use crate::error::ApiError;
use crate::habits::dto::{
    CreateHabitRequest, CreatedHabitResponse, HabitDetails, HabitListResponse, StatusBody,
    ToggleResponse,
};
use crate::habits::repo::NewHabit;
use crate::habits::repo_types::Habit;
use crate::habits::services::{is_scheduled_on, parse_wall_time, today_utc, HABIT_FEE};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/todayHabits", get(today_habits))
        .route("/admin/allHabits", get(all_habits))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/habit", put(create_habit))
        .route("/admin/habit/:habitId", delete(delete_habit))
        .route("/admin/check/:habitId", post(check_habit))
}

fn validate_habit(req: &CreateHabitRequest) -> Result<(Time, Time), ApiError> {
    if req.habit.trim().len() < 2 {
        return Err(ApiError::Validation(
            "Habit must be a minimum of 2 characters".into(),
        ));
    }
    if req.days.is_empty() {
        return Err(ApiError::Validation("Days must not be empty".into()));
    }
    if req.days.iter().any(|d| !(0..=6).contains(d)) {
        return Err(ApiError::Validation(
            "Days must be weekday indexes between 0 and 6".into(),
        ));
    }
    let start = parse_wall_time(req.start_time.trim())
        .ok_or_else(|| ApiError::Validation("Start time must be a valid time".into()))?;
    let end = parse_wall_time(req.end_time.trim())
        .ok_or_else(|| ApiError::Validation("End time must be a valid time".into()))?;
    Ok((start, end))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_habit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<CreatedHabitResponse>), ApiError> {
    let (start_time, end_time) = validate_habit(&payload)?;

    if user.habit_tokens < HABIT_FEE {
        return Err(ApiError::InsufficientTokens);
    }

    let habit = Habit::create(
        &state.db,
        user.id,
        NewHabit {
            habit: payload.habit.trim(),
            days: &payload.days,
            start_time,
            end_time,
            note: payload.note.as_deref(),
        },
    )
    .await?
    // the transactional debit re-checks the balance
    .ok_or(ApiError::InsufficientTokens)?;

    info!(habit_id = %habit.id, "habit created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedHabitResponse {
            message: "Habit created successfully".into(),
            status_code: 201,
            habit: HabitDetails::from(&habit),
        }),
    ))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn today_habits(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<HabitListResponse>, ApiError> {
    let (_, weekday) = today_utc();
    let habits = Habit::list_by_user(&state.db, user.id).await?;
    let today: Vec<HabitDetails> = habits
        .iter()
        .filter(|h| is_scheduled_on(&h.days, weekday))
        .map(HabitDetails::from)
        .collect();

    Ok(Json(HabitListResponse {
        message: "Today's habits fetched successfully".into(),
        status_code: 200,
        habits: today,
    }))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn all_habits(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<HabitListResponse>, ApiError> {
    let habits = Habit::list_by_user(&state.db, user.id).await?;

    Ok(Json(HabitListResponse {
        message: "Habits fetched successfully".into(),
        status_code: 200,
        habits: habits.iter().map(HabitDetails::from).collect(),
    }))
}

#[instrument(skip_all, fields(user_id = %user.id, habit_id = %habit_id))]
pub async fn delete_habit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(habit_id): Path<Uuid>,
) -> Result<Json<StatusBody>, ApiError> {
    let deleted = Habit::delete_owned(&state.db, user.id, habit_id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!("habit deleted, fee refunded");
    Ok(Json(StatusBody {
        message: "Habit deleted successfully".into(),
        status_code: 200,
    }))
}

#[instrument(skip_all, fields(user_id = %user.id, habit_id = %habit_id))]
pub async fn check_habit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(habit_id): Path<Uuid>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let (today, _) = today_utc();
    let checked = Habit::toggle_today(&state.db, user.id, habit_id, today)
        .await?
        .ok_or(ApiError::NotFound)?;

    let message = if checked {
        "Habit checked successfully"
    } else {
        "Habit unchecked successfully"
    };
    info!(checked, "habit toggled");
    Ok(Json(ToggleResponse {
        message: message.into(),
        status_code: 200,
        checked,
    }))
}

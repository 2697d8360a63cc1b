use sqlx::PgPool;
use time::{Date, Time};
use uuid::Uuid;

use crate::habits::repo_types::Habit;
use crate::habits::services::{toggle_completion, COMPLETION_REWARD, HABIT_FEE};

pub struct NewHabit<'a> {
    pub habit: &'a str,
    pub days: &'a [i16],
    pub start_time: Time,
    pub end_time: Time,
    pub note: Option<&'a str>,
}

impl Habit {
    /// All habits owned by the user, newest first.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Habit>> {
        let rows = sqlx::query_as::<_, Habit>(
            r#"
            SELECT id, user_id, habit, days, start_time, end_time, note, completion_dates, created_at
            FROM habits
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Insert a habit and debit the creation fee in one transaction.
    /// Returns `None` when the balance no longer covers the fee; the debit
    /// statement re-checks it so two concurrent creates cannot overdraw.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        new: NewHabit<'_>,
    ) -> anyhow::Result<Option<Habit>> {
        let mut tx = db.begin().await?;

        let debited = sqlx::query(
            r#"
            UPDATE users
            SET habit_tokens = habit_tokens - $1
            WHERE id = $2 AND habit_tokens >= $1
            "#,
        )
        .bind(HABIT_FEE)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if debited.rows_affected() == 0 {
            return Ok(None);
        }

        let habit = sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (user_id, habit, days, start_time, end_time, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, habit, days, start_time, end_time, note, completion_dates, created_at
            "#,
        )
        .bind(user_id)
        .bind(new.habit)
        .bind(new.days)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(new.note)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(habit))
    }

    /// Delete an owned habit and credit the full fee back, in one
    /// transaction. The refund is unconditional regardless of how often
    /// the habit was completed. Returns false when the habit is absent
    /// or owned by someone else.
    pub async fn delete_owned(db: &PgPool, user_id: Uuid, habit_id: Uuid) -> anyhow::Result<bool> {
        let mut tx = db.begin().await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM habits
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(habit_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if deleted.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE users
            SET habit_tokens = habit_tokens + $1
            WHERE id = $2
            "#,
        )
        .bind(HABIT_FEE)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Flip the habit's completion state for `today` and move the reward
    /// accordingly. The row is locked while the array is rewritten so
    /// concurrent toggles serialize instead of racing the balance.
    /// Returns `None` when the habit is absent or not owned, otherwise
    /// the new state (true = checked).
    pub async fn toggle_today(
        db: &PgPool,
        user_id: Uuid,
        habit_id: Uuid,
        today: Date,
    ) -> anyhow::Result<Option<bool>> {
        let mut tx = db.begin().await?;

        let habit = sqlx::query_as::<_, Habit>(
            r#"
            SELECT id, user_id, habit, days, start_time, end_time, note, completion_dates, created_at
            FROM habits
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(habit_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut habit) = habit else {
            return Ok(None);
        };

        let checked = toggle_completion(&mut habit.completion_dates, today);

        sqlx::query(
            r#"
            UPDATE habits
            SET completion_dates = $1
            WHERE id = $2
            "#,
        )
        .bind(&habit.completion_dates)
        .bind(habit_id)
        .execute(&mut *tx)
        .await?;

        // unchecking revokes the reward, no floor at zero
        let delta = if checked {
            COMPLETION_REWARD
        } else {
            -COMPLETION_REWARD
        };
        sqlx::query(
            r#"
            UPDATE users
            SET habit_tokens = habit_tokens + $1
            WHERE id = $2
            "#,
        )
        .bind(delta)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(checked))
    }
}

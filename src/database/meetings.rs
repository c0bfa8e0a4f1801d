use crate::error::{AppError, AppResult};
use crate::models::{MeetingKind, MeetingRecord, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Rebuilds a record from a row, rejecting rows that violate the data
/// model instead of coercing them.
fn record_from_row(row: &SqliteRow) -> AppResult<MeetingRecord> {
    let tag: String = row.try_get("meeting_type")?;
    let invited_json: String = row.try_get("invited_users")?;
    let invited: Vec<UserId> = serde_json::from_str(&invited_json).map_err(|e| {
        AppError::invalid_record(format!("invited_users is not a JSON list: {}", e))
    })?;
    let kind = MeetingKind::from_parts(&tag, invited)?;

    let max_users: i64 = row.try_get("max_users")?;
    let max_users = u32::try_from(max_users)
        .map_err(|_| AppError::invalid_record(format!("max_users {} out of range", max_users)))?;

    let record = MeetingRecord {
        id: Some(row.try_get("id")?),
        meeting_id: row.try_get("meeting_id")?,
        meeting_name: row.try_get("meeting_name")?,
        created_by: UserId::new(row.try_get::<String, _>("created_by")?),
        kind,
        meeting_date: row.try_get("meeting_date")?,
        max_users,
        active: row.try_get("active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };
    record.validate()?;
    Ok(record)
}

fn invited_users_json(record: &MeetingRecord) -> AppResult<String> {
    serde_json::to_string(record.invited_users())
        .map_err(|e| AppError::invalid_record(format!("cannot encode invited_users: {}", e)))
}

pub async fn exists(pool: &SqlitePool, meeting_id: &str) -> AppResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meetings WHERE meeting_id = ?")
        .bind(meeting_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn insert(pool: &SqlitePool, record: &MeetingRecord) -> AppResult<i64> {
    let result = sqlx::query(
        "INSERT INTO meetings (meeting_id, meeting_name, created_by, meeting_type, invited_users, meeting_date, max_users, active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(&record.meeting_id)
    .bind(&record.meeting_name)
    .bind(record.created_by.as_str())
    .bind(record.kind.tag())
    .bind(invited_users_json(record)?)
    .bind(record.meeting_date)
    .bind(record.max_users as i64)
    .bind(record.active)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_by_meeting_id(
    pool: &SqlitePool,
    meeting_id: &str,
) -> AppResult<Option<MeetingRecord>> {
    let row = sqlx::query(
        "SELECT id, meeting_id, meeting_name, created_by, meeting_type, invited_users, meeting_date, max_users, active, created_at, updated_at FROM meetings WHERE meeting_id = ?"
    )
    .bind(meeting_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(record_from_row).transpose()
}

/// Full collection in insertion order; feeds the roster filter and pager.
pub async fn get_all(pool: &SqlitePool) -> AppResult<Vec<MeetingRecord>> {
    let rows = sqlx::query(
        "SELECT id, meeting_id, meeting_name, created_by, meeting_type, invited_users, meeting_date, max_users, active, created_at, updated_at FROM meetings ORDER BY id ASC"
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(record_from_row).collect()
}

pub async fn get_created_by(pool: &SqlitePool, user: &UserId) -> AppResult<Vec<MeetingRecord>> {
    let rows = sqlx::query(
        "SELECT id, meeting_id, meeting_name, created_by, meeting_type, invited_users, meeting_date, max_users, active, created_at, updated_at FROM meetings WHERE created_by = ? ORDER BY id ASC"
    )
    .bind(user.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(record_from_row).collect()
}

/// Writes the mutable fields back. The meeting code, owner, creation time
/// and active flag are never touched here.
pub async fn update(pool: &SqlitePool, record: &MeetingRecord) -> AppResult<()> {
    sqlx::query(
        "UPDATE meetings SET meeting_name = ?, invited_users = ?, meeting_date = ?, max_users = ?, updated_at = ? WHERE meeting_id = ?"
    )
    .bind(&record.meeting_name)
    .bind(invited_users_json(record)?)
    .bind(record.meeting_date)
    .bind(record.max_users as i64)
    .bind(record.updated_at)
    .bind(&record.meeting_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Flips active to false. There is deliberately no inverse operation.
pub async fn set_cancelled(pool: &SqlitePool, meeting_id: &str) -> AppResult<()> {
    sqlx::query("UPDATE meetings SET active = 0, updated_at = ? WHERE meeting_id = ?")
        .bind(chrono::Utc::now())
        .bind(meeting_id)
        .execute(pool)
        .await?;

    Ok(())
}

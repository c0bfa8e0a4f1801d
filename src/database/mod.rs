use crate::engine::{classify, MeetingStatus};
use crate::error::{AppError, AppResult};
use crate::models::{MeetingRecord, MeetingUpdate, UserId};
use crate::utils::generate_meeting_id;
use crate::utils::logging::log_database_operation;
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};
use std::time::Instant;

// Declare submodules
pub mod meetings;

/// Attempts before giving up on allocating a unique meeting code.
const MAX_CODE_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(db_path: &str) -> AppResult<Self> {
        // Create database if it doesn't exist
        let db_exists = Sqlite::database_exists(db_path)
            .await
            .context("Failed to check if database exists")?;
        if !db_exists {
            info!("Creating database");
            Sqlite::create_database(db_path)
                .await
                .context("Failed to create database")?;
        }

        let pool = SqlitePool::connect(db_path)
            .await
            .context("Failed to connect to database")?;

        run_schema(&pool)
            .await
            .context("Failed to run database schema")?;

        info!("Database initialized successfully");

        Ok(Database { pool })
    }

    /// Stores a new meeting.
    ///
    /// Uniqueness of the shareable code is enforced here with a
    /// check-then-insert; on the rare collision the code is regenerated.
    /// A concurrent create can slip between the check and the insert, so
    /// losing the UNIQUE constraint race also counts as a collision and
    /// retries. Returns the stored record, which may therefore carry a
    /// different code than the one passed in.
    pub async fn create_meeting(&self, record: &MeetingRecord) -> AppResult<MeetingRecord> {
        record.validate()?;

        let mut stored = record.clone();
        for _ in 0..MAX_CODE_ATTEMPTS {
            if meetings::exists(&self.pool, &stored.meeting_id).await? {
                warn!(
                    "Meeting code {} already taken, regenerating",
                    stored.meeting_id
                );
                stored.meeting_id = generate_meeting_id();
                continue;
            }
            match meetings::insert(&self.pool, &stored).await {
                Ok(id) => {
                    stored.id = Some(id);
                    info!(
                        "Created meeting '{}' ({})",
                        stored.meeting_name, stored.meeting_id
                    );
                    return Ok(stored);
                }
                Err(AppError::Database(e)) if is_unique_violation(&e) => {
                    warn!(
                        "Meeting code {} lost an insert race, regenerating",
                        stored.meeting_id
                    );
                    stored.meeting_id = generate_meeting_id();
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::operation_failed(
            "could not allocate a unique meeting code",
        ))
    }

    pub async fn get_meeting(&self, meeting_id: &str) -> AppResult<MeetingRecord> {
        meetings::get_by_meeting_id(&self.pool, meeting_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("meeting {}", meeting_id)))
    }

    pub async fn get_all_meetings(&self) -> AppResult<Vec<MeetingRecord>> {
        let start = Instant::now();
        let records = meetings::get_all(&self.pool).await?;
        log_database_operation("SELECT all", "meetings", start.elapsed().as_millis() as u64);
        Ok(records)
    }

    pub async fn get_my_meetings(&self, user: &UserId) -> AppResult<Vec<MeetingRecord>> {
        let start = Instant::now();
        let records = meetings::get_created_by(&self.pool, user).await?;
        log_database_operation(
            "SELECT by owner",
            "meetings",
            start.elapsed().as_millis() as u64,
        );
        Ok(records)
    }

    /// Single mutation entry point for a meeting's editable fields.
    ///
    /// Preconditions, checked here rather than trusted to callers: only
    /// the owner mutates, the meeting type never changes, and neither a
    /// cancelled nor an ended meeting can be edited.
    pub async fn update_meeting(
        &self,
        requesting_user: &UserId,
        meeting_id: &str,
        changes: MeetingUpdate,
        today: NaiveDate,
    ) -> AppResult<MeetingRecord> {
        let mut record = self.get_meeting(meeting_id).await?;

        if record.created_by != *requesting_user {
            return Err(AppError::permission_denied(format!(
                "user {} does not own meeting {}",
                requesting_user, meeting_id
            )));
        }
        match classify(&record, today) {
            MeetingStatus::Cancelled => {
                return Err(AppError::invalid_input(
                    "a cancelled meeting cannot be edited",
                ))
            }
            MeetingStatus::Ended => {
                return Err(AppError::invalid_input("an ended meeting cannot be edited"))
            }
            MeetingStatus::Live | MeetingStatus::Upcoming => {}
        }

        if let Some(meeting_name) = changes.meeting_name {
            record.meeting_name = meeting_name;
        }
        if let Some(meeting_date) = changes.meeting_date {
            record.meeting_date = meeting_date;
        }
        if let Some(kind) = changes.kind {
            if kind.tag() != record.kind.tag() {
                return Err(AppError::invalid_input("the meeting type cannot change"));
            }
            record.kind = kind;
        }
        if let Some(max_users) = changes.max_users {
            record.max_users = max_users;
        }
        record.updated_at = Utc::now();

        record.validate()?;
        meetings::update(&self.pool, &record).await?;
        info!("Updated meeting {}", meeting_id);

        Ok(record)
    }

    /// Cancels a meeting. Owner-only, idempotent, and irreversible: no
    /// operation anywhere sets the flag back to active.
    pub async fn cancel_meeting(
        &self,
        requesting_user: &UserId,
        meeting_id: &str,
    ) -> AppResult<()> {
        let record = self.get_meeting(meeting_id).await?;

        if record.created_by != *requesting_user {
            return Err(AppError::permission_denied(format!(
                "user {} does not own meeting {}",
                requesting_user, meeting_id
            )));
        }
        if !record.active {
            return Ok(());
        }

        meetings::set_cancelled(&self.pool, meeting_id).await?;
        info!("Cancelled meeting {}", meeting_id);

        Ok(())
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

async fn run_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    let schema = include_str!("schema.sql");

    for statement in schema.split(';') {
        let statement = statement.trim();
        if statement.is_empty()
            || statement.lines().all(|line| line.trim_start().starts_with("--"))
        {
            continue;
        }
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

//! Meeting command handlers
//!
//! Async orchestration between the storage boundary and the pure engine
//! rules. Handlers fetch records, delegate every verdict to the engine,
//! and push outcomes into an optional notification channel; they never
//! re-derive access or lifecycle rules themselves.

use crate::config::AppConfig;
use crate::database::Database;
use crate::engine::{
    can_access, visible_to, AccessDecision, DeniedReason, MeetingStatus, PageSlice, Pagination,
};
use crate::error::{AppError, AppResult};
use crate::models::{IdentityProvider, MeetingRecord, MeetingUpdate, UserId};
use crate::utils::generate_meeting_id;
use crate::utils::logging::log_access_decision;
use chrono::NaiveDate;
use tokio::sync::mpsc::Sender;

/// Outcome events the calling surface may turn into toasts, redirects or
/// a session teardown. The engine only classifies; rendering is the
/// caller's job.
#[derive(Debug, Clone)]
pub enum Notification {
    MeetingCreated {
        meeting_id: String,
        meeting_name: String,
    },
    MeetingUpdated {
        meeting_id: String,
    },
    MeetingCancelled {
        meeting_id: String,
    },
    JoinDenied {
        meeting_id: String,
        reason: DeniedReason,
    },
    /// A previously live session is no longer joinable; the caller should
    /// tear down the external video session.
    SessionExpired {
        meeting_id: String,
        status: MeetingStatus,
    },
}

pub type NotificationSender = Sender<Notification>;

pub struct MeetingHandlers {
    pub db: Database,
    pub config: AppConfig,
    notifier: Option<NotificationSender>,
}

impl MeetingHandlers {
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self {
            db,
            config,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: NotificationSender) -> Self {
        self.notifier = Some(notifier);
        self
    }

    async fn notify(&self, notification: Notification) {
        if let Some(tx) = &self.notifier {
            // A closed sink is the caller's problem, not a handler error.
            let _ = tx.send(notification).await;
        }
    }

    pub async fn create_one_on_one(
        &self,
        created_by: UserId,
        meeting_name: String,
        invitee: UserId,
        meeting_date: NaiveDate,
    ) -> AppResult<MeetingRecord> {
        let record = MeetingRecord::one_on_one(
            generate_meeting_id(),
            meeting_name,
            created_by,
            invitee,
            meeting_date,
        );
        self.store_new(record).await
    }

    pub async fn create_video_conference(
        &self,
        created_by: UserId,
        meeting_name: String,
        invited: Vec<UserId>,
        meeting_date: NaiveDate,
        max_users: u32,
    ) -> AppResult<MeetingRecord> {
        if max_users > self.config.max_conference_users {
            return Err(AppError::invalid_input(format!(
                "a conference admits at most {} users",
                self.config.max_conference_users
            )));
        }
        let record = MeetingRecord::video_conference(
            generate_meeting_id(),
            meeting_name,
            created_by,
            invited,
            meeting_date,
            max_users,
        );
        self.store_new(record).await
    }

    pub async fn create_open_meeting(
        &self,
        created_by: UserId,
        meeting_name: String,
        meeting_date: NaiveDate,
    ) -> AppResult<MeetingRecord> {
        let record = MeetingRecord::anyone_can_join(
            generate_meeting_id(),
            meeting_name,
            created_by,
            meeting_date,
        );
        self.store_new(record).await
    }

    async fn store_new(&self, record: MeetingRecord) -> AppResult<MeetingRecord> {
        let stored = self.db.create_meeting(&record).await?;
        self.notify(Notification::MeetingCreated {
            meeting_id: stored.meeting_id.clone(),
            meeting_name: stored.meeting_name.clone(),
        })
        .await;
        Ok(stored)
    }

    pub async fn edit_meeting(
        &self,
        requesting_user: &UserId,
        meeting_id: &str,
        changes: MeetingUpdate,
        today: NaiveDate,
    ) -> AppResult<MeetingRecord> {
        let updated = self
            .db
            .update_meeting(requesting_user, meeting_id, changes, today)
            .await?;
        self.notify(Notification::MeetingUpdated {
            meeting_id: meeting_id.to_string(),
        })
        .await;
        Ok(updated)
    }

    pub async fn cancel_meeting(
        &self,
        requesting_user: &UserId,
        meeting_id: &str,
    ) -> AppResult<()> {
        self.db.cancel_meeting(requesting_user, meeting_id).await?;
        self.notify(Notification::MeetingCancelled {
            meeting_id: meeting_id.to_string(),
        })
        .await;
        Ok(())
    }

    /// Management listing: strictly the meetings the user owns.
    pub async fn my_meetings(
        &self,
        user: &UserId,
        pagination: &Pagination,
    ) -> AppResult<PageSlice<MeetingRecord>> {
        let records = self.db.get_my_meetings(user).await?;
        Ok(pagination.slice(&records))
    }

    /// Browse listing: everything the user is entitled to see.
    pub async fn visible_meetings(
        &self,
        user: &UserId,
        pagination: &Pagination,
    ) -> AppResult<PageSlice<MeetingRecord>> {
        let records = self.db.get_all_meetings().await?;
        let visible: Vec<MeetingRecord> =
            visible_to(user, &records).into_iter().cloned().collect();
        Ok(pagination.slice(&visible))
    }

    /// Gate for the join flow.
    ///
    /// Resolves the caller through the identity provider, falling back to
    /// a generated guest identity for anonymous callers, then asks the
    /// engine for a verdict. A denial is reported through the notification
    /// sink and also returned, so the surface can redirect on it.
    pub async fn join_meeting(
        &self,
        identity: &dyn IdentityProvider,
        meeting_id: &str,
        today: NaiveDate,
    ) -> AppResult<AccessDecision> {
        let record = self.db.get_meeting(meeting_id).await?;
        let user = identity.current_user().unwrap_or_else(UserId::guest);

        let decision = can_access(&record, &user, today);
        log_access_decision(meeting_id, user.as_str(), &decision);
        if let AccessDecision::Denied(reason) = &decision {
            self.notify(Notification::JoinDenied {
                meeting_id: meeting_id.to_string(),
                reason: *reason,
            })
            .await;
        }
        Ok(decision)
    }
}

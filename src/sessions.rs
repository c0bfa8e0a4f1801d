//! Live-session watcher
//!
//! The engine does not own the video session; it only decides when one is
//! no longer joinable. This loop re-classifies a meeting while a session
//! is up and emits a single `SessionExpired` notification the moment the
//! meeting stops being live, which is the caller's cue to tear the
//! external session down.

use crate::engine::{classify, MeetingStatus};
use crate::error::AppResult;
use crate::handlers::{Notification, NotificationSender};
use crate::AppState;
use chrono::Local;
use log::{debug, error, info};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

const CHECK_INTERVAL: Duration = Duration::from_secs(60);

pub async fn watch_session(
    state: Arc<AppState>,
    meeting_id: String,
    sender: Option<NotificationSender>,
) {
    info!("Starting session watcher for meeting {}", meeting_id);

    loop {
        if state.shutdown.is_cancelled() {
            break;
        }

        match check_session(&state, &meeting_id).await {
            Ok(Some(status)) => {
                info!(
                    "Meeting {} is no longer joinable ({}), signalling teardown",
                    meeting_id, status
                );
                if let Some(tx) = &sender {
                    let _ = tx
                        .send(Notification::SessionExpired {
                            meeting_id: meeting_id.clone(),
                            status,
                        })
                        .await;
                }
                break;
            }
            Ok(None) => {
                debug!("Meeting {} still live", meeting_id);
            }
            Err(e) => {
                // Storage hiccups are transient here; keep watching.
                error!("Session watcher error for meeting {}: {}", meeting_id, e);
            }
        }

        tokio::select! {
            _ = sleep(CHECK_INTERVAL) => {}
            _ = state.shutdown.cancelled() => break,
        }
    }

    info!("Session watcher for meeting {} stopped", meeting_id);
}

/// Returns the terminal status once the meeting stops being live, `None`
/// while it still is. The ambient clock read happens here, at the
/// boundary; the classifier itself stays deterministic.
async fn check_session(state: &AppState, meeting_id: &str) -> AppResult<Option<MeetingStatus>> {
    let record = state.db.get_meeting(meeting_id).await?;
    let today = Local::now().date_naive();

    match classify(&record, today) {
        MeetingStatus::Live => Ok(None),
        status => Ok(Some(status)),
    }
}

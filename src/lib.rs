// ConnectWave Meeting Access & Lifecycle Engine
// Decides who may enter a meeting right now and what state a meeting is
// in for display. UI, media transport and identity issuance live outside
// this crate.

pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;
pub mod sessions;
pub mod utils;

// Re-export commonly used types
pub use config::{validate_config, AppConfig};
pub use database::Database;
pub use engine::{
    can_access, classify, owned_by, paginate, visible_to, AccessDecision, DeniedReason,
    MeetingStatus, PageSlice, Pagination,
};
pub use error::{AppError, AppResult};
pub use handlers::{MeetingHandlers, Notification, NotificationSender};
pub use models::*;
pub use utils::generate_meeting_id;

use std::sync::Arc;

/// Application state shared across long-lived tasks
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub shutdown: tokio_util::sync::CancellationToken,
}

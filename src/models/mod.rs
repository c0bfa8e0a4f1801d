// Declare modules
pub mod meeting;
pub mod user;

// Re-export all public types so callers can use flat imports like
// `use connectwave::MeetingRecord`.
pub use meeting::{
    MeetingKind, MeetingRecord, MeetingUpdate, MEETING_ID_LEN, OPEN_MEETING_CAPACITY,
};
pub use user::{IdentityProvider, UserId};

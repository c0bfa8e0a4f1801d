use crate::error::{AppError, AppResult};
use crate::models::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Capacity ceiling applied to anyone-can-join meetings.
pub const OPEN_MEETING_CAPACITY: u32 = 100;

/// Length of a shareable meeting code.
pub const MEETING_ID_LEN: usize = 8;

/// The three meeting variants, each carrying its own membership data.
///
/// Modeled as a closed enum so the membership rule for a variant cannot be
/// applied to the wrong one: a one-on-one meeting holds exactly its single
/// invitee, an open meeting holds none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeetingKind {
    OneOnOne(UserId),
    VideoConference(Vec<UserId>),
    AnyoneCanJoin,
}

impl MeetingKind {
    pub const ONE_ON_ONE: &'static str = "1-on-1";
    pub const VIDEO_CONFERENCE: &'static str = "video-conference";
    pub const ANYONE_CAN_JOIN: &'static str = "anyone-can-join";

    /// Stable tag used in the persisted meeting_type column.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::OneOnOne(_) => Self::ONE_ON_ONE,
            Self::VideoConference(_) => Self::VIDEO_CONFERENCE,
            Self::AnyoneCanJoin => Self::ANYONE_CAN_JOIN,
        }
    }

    /// Rebuilds a kind from its persisted tag and invitee list.
    ///
    /// A row whose invitee list does not fit its tag is corrupt input and
    /// is rejected rather than coerced.
    pub fn from_parts(tag: &str, mut invited: Vec<UserId>) -> AppResult<Self> {
        match tag {
            Self::ONE_ON_ONE => {
                if invited.len() != 1 {
                    return Err(AppError::invalid_record(format!(
                        "1-on-1 meeting must have exactly one invitee, found {}",
                        invited.len()
                    )));
                }
                Ok(Self::OneOnOne(invited.remove(0)))
            }
            Self::VIDEO_CONFERENCE => Ok(Self::VideoConference(invited)),
            Self::ANYONE_CAN_JOIN => {
                if !invited.is_empty() {
                    return Err(AppError::invalid_record(
                        "anyone-can-join meeting must have no invitees",
                    ));
                }
                Ok(Self::AnyoneCanJoin)
            }
            other => Err(AppError::invalid_record(format!(
                "unknown meeting type: {}",
                other
            ))),
        }
    }

    /// Invitee list as stored; empty for anyone-can-join.
    pub fn invited_users(&self) -> &[UserId] {
        match self {
            Self::OneOnOne(invitee) => std::slice::from_ref(invitee),
            Self::VideoConference(invited) => invited,
            Self::AnyoneCanJoin => &[],
        }
    }

    /// Join-eligibility rule for this variant.
    pub fn is_member(&self, user: &UserId) -> bool {
        match self {
            Self::OneOnOne(invitee) => invitee == user,
            Self::VideoConference(invited) => invited.contains(user),
            Self::AnyoneCanJoin => true,
        }
    }
}

/// A scheduled meeting as persisted by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub id: Option<i64>,
    /// Short shareable code; immutable and globally unique.
    pub meeting_id: String,
    pub meeting_name: String,
    /// Owner; holds exclusive mutation rights.
    pub created_by: UserId,
    pub kind: MeetingKind,
    /// Calendar date the meeting occurs on. Day granularity only; a
    /// meeting is live for its entire scheduled day.
    pub meeting_date: NaiveDate,
    pub max_users: u32,
    /// False means cancelled, which is terminal.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MeetingRecord {
    fn new(
        meeting_id: String,
        meeting_name: String,
        created_by: UserId,
        kind: MeetingKind,
        meeting_date: NaiveDate,
        max_users: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            meeting_id,
            meeting_name,
            created_by,
            kind,
            meeting_date,
            max_users,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn one_on_one(
        meeting_id: String,
        meeting_name: String,
        created_by: UserId,
        invitee: UserId,
        meeting_date: NaiveDate,
    ) -> Self {
        Self::new(
            meeting_id,
            meeting_name,
            created_by,
            MeetingKind::OneOnOne(invitee),
            meeting_date,
            1,
        )
    }

    pub fn video_conference(
        meeting_id: String,
        meeting_name: String,
        created_by: UserId,
        invited: Vec<UserId>,
        meeting_date: NaiveDate,
        max_users: u32,
    ) -> Self {
        Self::new(
            meeting_id,
            meeting_name,
            created_by,
            MeetingKind::VideoConference(invited),
            meeting_date,
            max_users,
        )
    }

    pub fn anyone_can_join(
        meeting_id: String,
        meeting_name: String,
        created_by: UserId,
        meeting_date: NaiveDate,
    ) -> Self {
        Self::new(
            meeting_id,
            meeting_name,
            created_by,
            MeetingKind::AnyoneCanJoin,
            meeting_date,
            OPEN_MEETING_CAPACITY,
        )
    }

    pub fn invited_users(&self) -> &[UserId] {
        self.kind.invited_users()
    }

    /// Structural invariant check, applied at the storage boundary on both
    /// write and read. Malformed records fail fast instead of degrading to
    /// a best-guess state.
    pub fn validate(&self) -> AppResult<()> {
        if self.meeting_name.trim().is_empty() {
            return Err(AppError::invalid_record("meeting name must not be empty"));
        }
        if self.meeting_id.len() != MEETING_ID_LEN
            || !self.meeting_id.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::invalid_record(format!(
                "meeting id '{}' is not an {}-character code",
                self.meeting_id, MEETING_ID_LEN
            )));
        }
        match &self.kind {
            MeetingKind::OneOnOne(_) => {
                if self.max_users != 1 {
                    return Err(AppError::invalid_record(
                        "1-on-1 meeting must have max_users = 1",
                    ));
                }
            }
            MeetingKind::VideoConference(_) => {
                if self.max_users == 0 {
                    return Err(AppError::invalid_record(
                        "video conference must admit at least one user",
                    ));
                }
            }
            MeetingKind::AnyoneCanJoin => {
                if self.max_users != OPEN_MEETING_CAPACITY {
                    return Err(AppError::invalid_record(format!(
                        "anyone-can-join meeting must have max_users = {}",
                        OPEN_MEETING_CAPACITY
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Owner-editable fields of a meeting.
///
/// The meeting code, owner, and active flag are deliberately absent: the
/// code and owner are immutable, and cancellation goes through its own
/// operation so an edit can never reverse it.
#[derive(Debug, Clone, Default)]
pub struct MeetingUpdate {
    pub meeting_name: Option<String>,
    pub meeting_date: Option<NaiveDate>,
    pub kind: Option<MeetingKind>,
    pub max_users: Option<u32>,
}

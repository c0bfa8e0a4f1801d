use crate::models::MeetingRecord;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

/// Derived lifecycle state of a meeting. Never stored; always computed
/// from the record and an explicit "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStatus {
    Cancelled,
    Ended,
    Live,
    Upcoming,
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cancelled => "Cancelled",
            Self::Ended => "Ended",
            Self::Live => "Live",
            Self::Upcoming => "Upcoming",
        };
        f.write_str(label)
    }
}

/// Classifies a meeting for a given calendar day.
///
/// Cancellation always wins over the date comparison. The comparison is
/// calendar-day only: a meeting is live for the whole of its scheduled
/// day regardless of wall-clock time. `today` is injected rather than
/// read from the system clock so the result is deterministic for a
/// fixed instant.
pub fn classify(record: &MeetingRecord, today: NaiveDate) -> MeetingStatus {
    if !record.active {
        return MeetingStatus::Cancelled;
    }
    match record.meeting_date.cmp(&today) {
        Ordering::Equal => MeetingStatus::Live,
        Ordering::Less => MeetingStatus::Ended,
        Ordering::Greater => MeetingStatus::Upcoming,
    }
}

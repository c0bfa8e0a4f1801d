use crate::engine::lifecycle::{classify, MeetingStatus};
use crate::models::{MeetingRecord, UserId};
use chrono::NaiveDate;
use std::fmt;

/// Why a join attempt was refused. A closed set; callers render these,
/// the engine never dispatches messages itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeniedReason {
    NotInvited,
    MeetingCancelled,
    MeetingEnded,
    /// Entry refused because the meeting has not started; carries the
    /// scheduled date so callers can display it.
    NotYetStarted { scheduled_for: NaiveDate },
}

impl fmt::Display for DeniedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInvited => write!(f, "You are not invited to the meeting."),
            Self::MeetingCancelled => write!(f, "Meeting has been cancelled."),
            Self::MeetingEnded => write!(f, "Meeting has ended."),
            Self::NotYetStarted { scheduled_for } => {
                write!(f, "Meeting is on {}", scheduled_for)
            }
        }
    }
}

/// Verdict of the access evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(DeniedReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn denied_reason(&self) -> Option<DeniedReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(*reason),
        }
    }
}

/// Decides whether `user` may enter the meeting right now.
///
/// Evaluation order is fixed: the owner is admitted in every state except
/// cancelled; everyone else must pass the per-kind membership rule before
/// the lifecycle state is consulted. Pure and side-effect free; whether a
/// denial also triggers a toast or redirect is the caller's business.
pub fn can_access(record: &MeetingRecord, user: &UserId, today: NaiveDate) -> AccessDecision {
    let status = classify(record, today);

    if *user == record.created_by {
        return match status {
            MeetingStatus::Cancelled => AccessDecision::Denied(DeniedReason::MeetingCancelled),
            _ => AccessDecision::Allowed,
        };
    }

    if !record.kind.is_member(user) {
        return AccessDecision::Denied(DeniedReason::NotInvited);
    }

    match status {
        MeetingStatus::Cancelled => AccessDecision::Denied(DeniedReason::MeetingCancelled),
        MeetingStatus::Ended => AccessDecision::Denied(DeniedReason::MeetingEnded),
        MeetingStatus::Upcoming => AccessDecision::Denied(DeniedReason::NotYetStarted {
            scheduled_for: record.meeting_date,
        }),
        MeetingStatus::Live => AccessDecision::Allowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn one_on_one(meeting_date: NaiveDate) -> MeetingRecord {
        MeetingRecord::one_on_one(
            "q3MN7pXe".to_string(),
            "Pairing".to_string(),
            UserId::from("A"),
            UserId::from("B"),
            meeting_date,
        )
    }

    fn conference(meeting_date: NaiveDate) -> MeetingRecord {
        MeetingRecord::video_conference(
            "q3MN7pXe".to_string(),
            "Sprint review".to_string(),
            UserId::from("A"),
            vec![UserId::from("B"), UserId::from("C")],
            meeting_date,
            10,
        )
    }

    #[test]
    fn test_owner_allowed_in_every_state_except_cancelled() {
        let today = date("2024-06-15");
        let owner = UserId::from("A");

        for offset in [-1i64, 0, 1] {
            let record = one_on_one(today + Duration::days(offset));
            assert!(can_access(&record, &owner, today).is_allowed());
        }

        let mut cancelled = one_on_one(today);
        cancelled.active = false;
        assert_eq!(
            can_access(&cancelled, &owner, today),
            AccessDecision::Denied(DeniedReason::MeetingCancelled)
        );
    }

    #[test]
    fn test_one_on_one_admits_only_the_listed_invitee() {
        let today = date("2024-06-15");
        let record = one_on_one(today);

        assert!(can_access(&record, &UserId::from("A"), today).is_allowed());
        assert!(can_access(&record, &UserId::from("B"), today).is_allowed());
        assert_eq!(
            can_access(&record, &UserId::from("C"), today),
            AccessDecision::Denied(DeniedReason::NotInvited)
        );
    }

    #[test]
    fn test_conference_membership_is_anywhere_in_the_list() {
        let today = date("2024-06-15");
        let record = conference(today);

        assert!(can_access(&record, &UserId::from("C"), today).is_allowed());
        assert_eq!(
            can_access(&record, &UserId::from("D"), today),
            AccessDecision::Denied(DeniedReason::NotInvited)
        );
    }

    #[test]
    fn test_open_meeting_admits_anyone_live() {
        let today = date("2024-06-15");
        let record = MeetingRecord::anyone_can_join(
            "q3MN7pXe".to_string(),
            "Town hall".to_string(),
            UserId::from("A"),
            today,
        );

        assert!(can_access(&record, &UserId::from("stranger"), today).is_allowed());
        assert!(can_access(&record, &UserId::guest(), today).is_allowed());
    }

    #[test]
    fn test_open_meeting_lifecycle_still_gates_members() {
        let today = date("2024-06-15");
        let guest = UserId::guest();

        let mut record = MeetingRecord::anyone_can_join(
            "q3MN7pXe".to_string(),
            "Town hall".to_string(),
            UserId::from("A"),
            today - Duration::days(2),
        );
        assert_eq!(
            can_access(&record, &guest, today),
            AccessDecision::Denied(DeniedReason::MeetingEnded)
        );

        record.meeting_date = today + Duration::days(3);
        assert_eq!(
            can_access(&record, &guest, today),
            AccessDecision::Denied(DeniedReason::NotYetStarted {
                scheduled_for: today + Duration::days(3)
            })
        );

        record.meeting_date = today;
        record.active = false;
        assert_eq!(
            can_access(&record, &guest, today),
            AccessDecision::Denied(DeniedReason::MeetingCancelled)
        );
    }

    #[test]
    fn test_invitee_denied_outside_the_scheduled_day() {
        let today = date("2024-06-15");
        let invitee = UserId::from("B");

        let record = one_on_one(today - Duration::days(1));
        assert_eq!(
            can_access(&record, &invitee, today),
            AccessDecision::Denied(DeniedReason::MeetingEnded)
        );

        let record = one_on_one(today + Duration::days(7));
        assert_eq!(
            can_access(&record, &invitee, today),
            AccessDecision::Denied(DeniedReason::NotYetStarted {
                scheduled_for: today + Duration::days(7)
            })
        );
    }

    #[test]
    fn test_cancelled_denies_owner_and_members_alike() {
        let today = date("2024-06-15");
        let mut record = conference(today);
        record.active = false;

        for user in ["A", "B", "C"] {
            assert_eq!(
                can_access(&record, &UserId::from(user), today),
                AccessDecision::Denied(DeniedReason::MeetingCancelled)
            );
        }
    }

    #[test]
    fn test_denied_reason_display() {
        assert_eq!(
            DeniedReason::MeetingEnded.to_string(),
            "Meeting has ended."
        );
        assert_eq!(
            DeniedReason::NotYetStarted {
                scheduled_for: date("2024-07-01")
            }
            .to_string(),
            "Meeting is on 2024-07-01"
        );
    }
}

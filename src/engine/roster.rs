use crate::models::{MeetingKind, MeetingRecord, UserId};

/// Records `user` is entitled to see in a listing, in the collection's
/// original order.
///
/// Visibility is deliberately broader than join-eligibility: any listed
/// invitee of a 1-on-1 meeting sees it in their roster even though only
/// the single listed user may eventually join.
pub fn visible_to<'a>(user: &UserId, records: &'a [MeetingRecord]) -> Vec<&'a MeetingRecord> {
    records
        .iter()
        .filter(|record| is_visible(user, record))
        .collect()
}

fn is_visible(user: &UserId, record: &MeetingRecord) -> bool {
    record.created_by == *user
        || matches!(record.kind, MeetingKind::AnyoneCanJoin)
        || record.invited_users().contains(user)
}

/// Strictly the records `user` created. Feeds the management and edit
/// listings; not interchangeable with [`visible_to`].
pub fn owned_by<'a>(user: &UserId, records: &'a [MeetingRecord]) -> Vec<&'a MeetingRecord> {
    records
        .iter()
        .filter(|record| record.created_by == *user)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        "2024-06-15".parse().unwrap()
    }

    fn sample_records() -> Vec<MeetingRecord> {
        vec![
            MeetingRecord::one_on_one(
                "aaaaaaa1".to_string(),
                "Pairing".to_string(),
                UserId::from("A"),
                UserId::from("B"),
                date(),
            ),
            MeetingRecord::video_conference(
                "aaaaaaa2".to_string(),
                "Sprint review".to_string(),
                UserId::from("B"),
                vec![UserId::from("C")],
                date(),
                10,
            ),
            MeetingRecord::anyone_can_join(
                "aaaaaaa3".to_string(),
                "Town hall".to_string(),
                UserId::from("C"),
                date(),
            ),
        ]
    }

    #[test]
    fn test_owner_sees_own_meetings_without_being_invited() {
        let records = sample_records();
        let visible = visible_to(&UserId::from("A"), &records);
        // A owns the 1-on-1 (not an invitee of it) and sees the open one.
        let ids: Vec<&str> = visible.iter().map(|r| r.meeting_id.as_str()).collect();
        assert_eq!(ids, vec!["aaaaaaa1", "aaaaaaa3"]);
    }

    #[test]
    fn test_invitee_sees_invite_meetings() {
        let records = sample_records();
        let ids: Vec<&str> = visible_to(&UserId::from("C"), &records)
            .iter()
            .map(|r| r.meeting_id.as_str())
            .collect();
        assert_eq!(ids, vec!["aaaaaaa2", "aaaaaaa3"]);
    }

    #[test]
    fn test_stranger_sees_only_open_meetings() {
        let records = sample_records();
        let ids: Vec<&str> = visible_to(&UserId::from("Z"), &records)
            .iter()
            .map(|r| r.meeting_id.as_str())
            .collect();
        assert_eq!(ids, vec!["aaaaaaa3"]);
    }

    #[test]
    fn test_input_order_is_preserved() {
        let mut records = sample_records();
        records.reverse();
        let ids: Vec<&str> = visible_to(&UserId::from("B"), &records)
            .iter()
            .map(|r| r.meeting_id.as_str())
            .collect();
        assert_eq!(ids, vec!["aaaaaaa3", "aaaaaaa2", "aaaaaaa1"]);
    }

    #[test]
    fn test_owned_by_is_strict() {
        let records = sample_records();
        let owned = owned_by(&UserId::from("B"), &records);
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].meeting_id, "aaaaaaa2");

        // B is invited to the 1-on-1 and can see it, but does not own it.
        let visible = visible_to(&UserId::from("B"), &records);
        assert_eq!(visible.len(), 2);
    }
}

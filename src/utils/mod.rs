use crate::models::MEETING_ID_LEN;
use rand::Rng;

pub mod logging;

// Same alphabet the join links have always used; mixed-case letters and
// digits only, so codes stay URL- and copy-paste-safe.
const MEETING_ID_CHARS: &[u8] =
    b"12345qwertyuiopasdfgh67890jklmnbvcxz26zXp3qlMNBVCZXASDQWERTYHGFUIOLKJP1X7EW";

/// Generates a short shareable meeting code.
///
/// Best-effort entropy only: no uniqueness check happens here. The storage
/// layer enforces global uniqueness with a check-then-insert on write.
pub fn generate_meeting_id() -> String {
    let mut rng = rand::thread_rng();
    (0..MEETING_ID_LEN)
        .map(|_| MEETING_ID_CHARS[rng.gen_range(0..MEETING_ID_CHARS.len())] as char)
        .collect()
}

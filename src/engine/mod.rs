//! Meeting access and lifecycle rules.
//!
//! Everything in this module is pure and synchronous: a record, an
//! explicit "today", and a requesting user identifier go in; a verdict or
//! a derived state comes out. No clock reads, no storage, no locking.

pub mod access;
pub mod lifecycle;
pub mod pager;
pub mod roster;

pub use access::{can_access, AccessDecision, DeniedReason};
pub use lifecycle::{classify, MeetingStatus};
pub use pager::{paginate, PageSlice, Pagination};
pub use roster::{owned_by, visible_to};

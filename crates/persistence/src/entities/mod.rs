//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod attendance;
pub mod guest;
pub mod invitation;

pub use attendance::{
    AttendanceRecordEntity, AttendanceRowEntity, AttendanceSourceDb, SummaryCountsEntity,
};
pub use guest::InvitedGuestEntity;
pub use invitation::InvitationEntity;

//! Domain models for the Tamu check-in core.

pub mod attendance;
pub mod guest;
pub mod invitation;
pub mod summary;

pub use attendance::{AttendanceRecord, AttendanceRow, AttendanceSource, AttendanceStatus};
pub use guest::{GuestResolution, InvitedGuest};
pub use invitation::Invitation;
pub use summary::AttendanceSummary;

//! Repository implementations.

pub mod attendance;
pub mod guest;
pub mod invitation;

pub use attendance::AttendanceRepository;
pub use guest::GuestRepository;
pub use invitation::InvitationRepository;

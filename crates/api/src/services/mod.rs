//! Application services for the check-in flow.

pub mod check_in;
pub mod photo_store;

pub use check_in::{CheckInService, RecordError};
pub use photo_store::{FsPhotoStore, PhotoStore};

pub mod booking;
pub mod catalog;

pub use booking::{Booking, BookingRequest, BookingStatus};
